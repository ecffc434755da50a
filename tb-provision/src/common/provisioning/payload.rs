//! Body of the provisioning request published on [`super::PROVISION_REQUEST_TOPIC`].
//!
//! Only the credential fields of the request's [`CredentialsType`] are written, fields set on
//! the request for another strategy are left out. An empty or missing device name is omitted
//! so the server names the device after its access token.
use serde::{ser::SerializeMap, Serialize, Serializer};

use super::{request::ProvisionRequest, CredentialsType, ProvisionError};

const DEVICE_NAME_KEY: &str = "deviceName";
const PROV_DEVICE_KEY: &str = "provisionDeviceKey";
const PROV_DEVICE_SECRET_KEY: &str = "provisionDeviceSecret";
const PROV_CRED_TYPE_KEY: &str = "credentialsType";
const PROV_TOKEN_KEY: &str = "token";
const PROV_CRED_USERNAME_KEY: &str = "username";
const PROV_CRED_PASSWORD_KEY: &str = "password";
const PROV_CRED_CLIENT_ID_KEY: &str = "clientId";
const PROV_CRED_HASH_KEY: &str = "hash";

impl Serialize for ProvisionRequest<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        entry(
            &mut map,
            DEVICE_NAME_KEY,
            self.device_name().filter(|n| !n.is_empty()),
        )?;
        entry(&mut map, PROV_DEVICE_KEY, self.device_key())?;
        entry(&mut map, PROV_DEVICE_SECRET_KEY, self.device_secret())?;
        entry(&mut map, PROV_CRED_TYPE_KEY, self.credentials_type_label())?;
        match self.credentials_type() {
            CredentialsType::ServerGenerated => {}
            CredentialsType::DeviceAccessToken => {
                entry(&mut map, PROV_TOKEN_KEY, self.device_access_token())?;
            }
            CredentialsType::BasicCredentials => {
                entry(&mut map, PROV_CRED_USERNAME_KEY, self.credentials_username())?;
                entry(&mut map, PROV_CRED_PASSWORD_KEY, self.credentials_password())?;
                entry(&mut map, PROV_CRED_CLIENT_ID_KEY, self.credentials_client_id())?;
            }
            CredentialsType::X509Certificate => {
                entry(&mut map, PROV_CRED_HASH_KEY, self.certificate_hash())?;
            }
        }
        map.end()
    }
}

// Absent fields are left out of the document
fn entry<M: SerializeMap>(map: &mut M, key: &str, value: Option<&str>) -> Result<(), M::Error> {
    match value {
        Some(value) => map.serialize_entry(key, value),
        None => Ok(()),
    }
}

impl ProvisionRequest<'_> {
    /// JSON document the transport layer publishes to start provisioning
    pub fn to_payload(&self) -> Result<serde_json::Value, ProvisionError> {
        Ok(serde_json::to_value(self)?)
    }
}
