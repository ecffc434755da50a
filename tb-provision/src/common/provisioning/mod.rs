//! Provisioning credential strategies and the request sent to the cloud.
//!
//! A device provisions itself with exactly one [`CredentialsType`]. The chosen type is sent
//! to the server as the `credentialsType` label and decides which response the server
//! returns.
use std::{fmt, str::FromStr};

use thiserror::Error;

pub mod payload;
pub mod request;
#[cfg(feature = "settings")]
pub mod settings;

/// Topic the transport publishes the provisioning request on
pub const PROVISION_REQUEST_TOPIC: &str = "/provision/request";
/// Topic the transport subscribes to for the provisioning response
pub const PROVISION_RESPONSE_TOPIC: &str = "/provision/response";

pub(crate) const PROVISION_CB_IS_NULL: &str = "Provisioning callback is NULL";

pub const ACCESS_TOKEN_CRED_TYPE: &str = "ACCESS_TOKEN";
pub const MQTT_BASIC_CRED_TYPE: &str = "MQTT_BASIC";
pub const X509_CERTIFICATE_CRED_TYPE: &str = "X509_CERTIFICATE";

/// Decoded provisioning response, handed untouched to the registered callback
pub type ProvisionData = serde_json::Map<String, serde_json::Value>;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),
    #[error("field `{field}` is set but not used by {credentials_type:?} provisioning")]
    UnexpectedField {
        field: &'static str,
        credentials_type: CredentialsType,
    },
    #[error("unknown credentials type `{0}`")]
    UnknownCredentialsType(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Strategy used to obtain the credentials of the provisioned device
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CredentialsType {
    /// The server generates the access token
    #[default]
    ServerGenerated,
    /// The device supplies its own access token
    DeviceAccessToken,
    /// The device supplies MQTT username, password and client id
    BasicCredentials,
    /// The device supplies the hash of its public X.509 certificate
    X509Certificate,
}

impl CredentialsType {
    /// Label sent as `credentialsType`, `None` when the server generates the credentials
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::ServerGenerated => None,
            Self::DeviceAccessToken => Some(ACCESS_TOKEN_CRED_TYPE),
            Self::BasicCredentials => Some(MQTT_BASIC_CRED_TYPE),
            Self::X509Certificate => Some(X509_CERTIFICATE_CRED_TYPE),
        }
    }
}

impl fmt::Display for CredentialsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or_default())
    }
}

impl FromStr for CredentialsType {
    type Err = ProvisionError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::ServerGenerated),
            ACCESS_TOKEN_CRED_TYPE => Ok(Self::DeviceAccessToken),
            MQTT_BASIC_CRED_TYPE => Ok(Self::BasicCredentials),
            X509_CERTIFICATE_CRED_TYPE => Ok(Self::X509Certificate),
            other => Err(ProvisionError::UnknownCredentialsType(other.to_owned())),
        }
    }
}
