//! Provisioning parameters read from a JSON document, typically baked into the firmware
//! image or written to flash by a commissioning tool.
//!
//! ```json
//! {
//!   "provision_device_key": "profile-key",
//!   "provision_device_secret": "profile-secret",
//!   "device_name": "weather-station",
//!   "credentials": {
//!     "credentials_type": "MQTT_BASIC",
//!     "username": "user",
//!     "password": "pass",
//!     "client_id": "client"
//!   }
//! }
//! ```
//!
//! `credentials` may be left out, the server then generates the access token.
use serde::Deserialize;

use super::{
    request::{ProvisionCallback, ProvisionRequest},
    CredentialsType, ProvisionError,
};

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(tag = "credentials_type")]
pub enum CredentialsSettings {
    #[default]
    #[serde(rename = "SERVER_GENERATED")]
    ServerGenerated,
    #[serde(rename = "ACCESS_TOKEN")]
    AccessToken { access_token: String },
    #[serde(rename = "MQTT_BASIC")]
    MqttBasic {
        username: String,
        password: String,
        client_id: String,
    },
    #[serde(rename = "X509_CERTIFICATE")]
    X509Certificate { hash: String },
}

impl CredentialsSettings {
    pub fn credentials_type(&self) -> CredentialsType {
        match self {
            Self::ServerGenerated => CredentialsType::ServerGenerated,
            Self::AccessToken { .. } => CredentialsType::DeviceAccessToken,
            Self::MqttBasic { .. } => CredentialsType::BasicCredentials,
            Self::X509Certificate { .. } => CredentialsType::X509Certificate,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ProvisionSettings {
    pub provision_device_key: String,
    pub provision_device_secret: String,
    pub device_name: Option<String>,
    #[serde(default)]
    pub credentials: CredentialsSettings,
}

impl ProvisionSettings {
    pub fn from_json(json: &str) -> Result<Self, ProvisionError> {
        let settings: Self = serde_json::from_str(json)?;
        log::debug!(
            "loaded provisioning settings using {:?} credentials",
            settings.credentials.credentials_type()
        );
        Ok(settings)
    }

    /// Builds the request matching the configured credentials, borrowing every string from
    /// these settings.
    pub fn request<'a>(&'a self, callback: ProvisionCallback<'a>) -> ProvisionRequest<'a> {
        let key = self.provision_device_key.as_str();
        let secret = self.provision_device_secret.as_str();
        let name = self.device_name.as_deref();
        match &self.credentials {
            CredentialsSettings::ServerGenerated => {
                ProvisionRequest::with_server_generated(callback, key, secret, name)
            }
            CredentialsSettings::AccessToken { access_token } => {
                ProvisionRequest::with_device_access_token(
                    callback,
                    key,
                    secret,
                    access_token,
                    name,
                )
            }
            CredentialsSettings::MqttBasic {
                username,
                password,
                client_id,
            } => ProvisionRequest::with_basic_credentials(
                callback, key, secret, username, password, client_id, name,
            ),
            CredentialsSettings::X509Certificate { hash } => {
                ProvisionRequest::with_x509_certificate(callback, key, secret, hash, name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::common::log::tests::RecordingLogger;
    use crate::common::provisioning::{
        request::ProvisionCallback, CredentialsType, ProvisionData, ProvisionError,
    };

    use super::{CredentialsSettings, ProvisionSettings};

    #[test_log::test]
    fn test_settings_default_to_server_generated() {
        let settings = ProvisionSettings::from_json(
            r#"{"provision_device_key": "key", "provision_device_secret": "secret"}"#,
        )
        .unwrap();
        assert_eq!(settings.device_name, None);
        assert_eq!(settings.credentials, CredentialsSettings::ServerGenerated);

        let req = settings.request(ProvisionCallback::none());
        assert_eq!(req.device_key(), Some("key"));
        assert_eq!(req.device_secret(), Some("secret"));
        assert_eq!(req.credentials_type_label(), None);
    }

    #[test_log::test]
    fn test_settings_mqtt_basic() {
        let settings = ProvisionSettings::from_json(
            r#"{
                "provision_device_key": "K",
                "provision_device_secret": "S",
                "device_name": "",
                "credentials": {
                    "credentials_type": "MQTT_BASIC",
                    "username": "u",
                    "password": "p",
                    "client_id": "c"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(
            settings.credentials.credentials_type(),
            CredentialsType::BasicCredentials
        );

        let calls = Cell::new(0);
        let req = settings.request(ProvisionCallback::new(|_| calls.set(calls.get() + 1)));
        assert_eq!(req.device_name(), Some(""));
        assert_eq!(req.credentials_type_label(), Some("MQTT_BASIC"));
        assert_eq!(req.credentials_username(), Some("u"));
        assert_eq!(req.credentials_password(), Some("p"));
        assert_eq!(req.credentials_client_id(), Some("c"));
        assert!(req.validate().is_ok());
        req.invoke::<RecordingLogger>(&ProvisionData::new());
        assert_eq!(calls.get(), 1);
    }

    #[test_log::test]
    fn test_settings_access_token_and_x509() {
        let settings = ProvisionSettings::from_json(
            r#"{
                "provision_device_key": "key",
                "provision_device_secret": "secret",
                "credentials": {"credentials_type": "ACCESS_TOKEN", "access_token": "token"}
            }"#,
        )
        .unwrap();
        let req = settings.request(ProvisionCallback::none());
        assert_eq!(req.device_access_token(), Some("token"));
        assert_eq!(req.credentials_type(), CredentialsType::DeviceAccessToken);

        let settings = ProvisionSettings::from_json(
            r#"{
                "provision_device_key": "key",
                "provision_device_secret": "secret",
                "device_name": "gateway",
                "credentials": {"credentials_type": "X509_CERTIFICATE", "hash": "3f2a9c"}
            }"#,
        )
        .unwrap();
        let req = settings.request(ProvisionCallback::none());
        assert_eq!(req.device_name(), Some("gateway"));
        assert_eq!(req.certificate_hash(), Some("3f2a9c"));
        assert_eq!(req.device_access_token(), None);
        assert_eq!(req.credentials_type_label(), Some("X509_CERTIFICATE"));
    }

    #[test_log::test]
    fn test_settings_errors() {
        let err = ProvisionSettings::from_json(
            r#"{
                "provision_device_key": "key",
                "provision_device_secret": "secret",
                "credentials": {"credentials_type": "PSK"}
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProvisionError::Json(_)));

        let err = ProvisionSettings::from_json(
            r#"{"provision_device_secret": "secret"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProvisionError::Json(_)));

        let err = ProvisionSettings::from_json(
            r#"{
                "provision_device_key": "key",
                "provision_device_secret": "secret",
                "credentials": {"credentials_type": "MQTT_BASIC", "username": "u"}
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProvisionError::Json(_)));
    }

    #[test_log::test]
    fn test_settings_device_name_optional() {
        let settings = ProvisionSettings::from_json(
            r#"{"provision_device_key": "key", "provision_device_secret": "secret", "device_name": null}"#,
        )
        .unwrap();
        assert_eq!(settings.device_name, None);
        assert_eq!(settings.request(ProvisionCallback::none()).device_name(), None);

        let settings = ProvisionSettings::from_json(
            r#"{"provision_device_key": "key", "provision_device_secret": "secret"}"#,
        )
        .unwrap();
        assert_eq!(settings.device_name, None);
    }
}
