use std::fmt::{self, Debug};

use crate::common::log::Logger;

use super::{CredentialsType, ProvisionData, ProvisionError, PROVISION_CB_IS_NULL};

/// Handler fired once the provisioning response has been received.
///
/// Plain `fn` items are accepted as well as closures, the closure may borrow anything that
/// outlives the request.
#[derive(Default)]
pub struct ProvisionCallback<'a>(Option<Box<dyn Fn(&ProvisionData) + 'a>>);

impl<'a> ProvisionCallback<'a> {
    pub fn new<F>(cb: F) -> Self
    where
        F: Fn(&ProvisionData) + 'a,
    {
        Self(Some(Box::new(cb)))
    }
    /// A callback that is never called, invoking it only logs a diagnostic
    pub fn none() -> Self {
        Self(None)
    }
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl Debug for ProvisionCallback<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_set() { "Set" } else { "None" })
    }
}

/// Provisioning request of a device, along with the callback handling the server response.
///
/// The request borrows every string it carries, they have to outlive the request until the
/// response has been dispatched with [`ProvisionRequest::invoke`]. Build it with the factory
/// matching the wanted [`CredentialsType`]; `Default` is the server generated strategy
/// without any callback, key or secret.
///
/// Setters replace a single field and do not check it against the credentials type, use
/// [`ProvisionRequest::validate`] to check the request before sending it.
#[derive(Default, Debug)]
pub struct ProvisionRequest<'a> {
    callback: ProvisionCallback<'a>,
    device_key: Option<&'a str>,
    device_secret: Option<&'a str>,
    device_name: Option<&'a str>,
    access_token: Option<&'a str>,
    cred_username: Option<&'a str>,
    cred_password: Option<&'a str>,
    cred_client_id: Option<&'a str>,
    hash: Option<&'a str>,
    credentials_type: CredentialsType,
}

impl<'a> ProvisionRequest<'a> {
    /// Credentials are generated by the server.
    ///
    /// Pass `None` or an empty `device_name` to have the access token used as the name.
    pub fn with_server_generated(
        callback: ProvisionCallback<'a>,
        device_key: &'a str,
        device_secret: &'a str,
        device_name: Option<&'a str>,
    ) -> Self {
        Self {
            callback,
            device_key: Some(device_key),
            device_secret: Some(device_secret),
            device_name,
            ..Default::default()
        }
    }

    /// The device supplies the access token it will use once provisioned
    pub fn with_device_access_token(
        callback: ProvisionCallback<'a>,
        device_key: &'a str,
        device_secret: &'a str,
        access_token: &'a str,
        device_name: Option<&'a str>,
    ) -> Self {
        Self {
            access_token: Some(access_token),
            credentials_type: CredentialsType::DeviceAccessToken,
            ..Self::with_server_generated(callback, device_key, device_secret, device_name)
        }
    }

    /// The device supplies the basic MQTT credentials it will connect with once provisioned
    pub fn with_basic_credentials(
        callback: ProvisionCallback<'a>,
        device_key: &'a str,
        device_secret: &'a str,
        username: &'a str,
        password: &'a str,
        client_id: &'a str,
        device_name: Option<&'a str>,
    ) -> Self {
        Self {
            cred_username: Some(username),
            cred_password: Some(password),
            cred_client_id: Some(client_id),
            credentials_type: CredentialsType::BasicCredentials,
            ..Self::with_server_generated(callback, device_key, device_secret, device_name)
        }
    }

    /// The device supplies the hash of its public X.509 certificate
    pub fn with_x509_certificate(
        callback: ProvisionCallback<'a>,
        device_key: &'a str,
        device_secret: &'a str,
        hash: &'a str,
        device_name: Option<&'a str>,
    ) -> Self {
        Self {
            hash: Some(hash),
            credentials_type: CredentialsType::X509Certificate,
            ..Self::with_server_generated(callback, device_key, device_secret, device_name)
        }
    }

    /// Hands the server response to the callback and returns once it is done.
    ///
    /// Without a callback nothing happens besides a diagnostic sent to `L`. A panicking
    /// callback unwinds through this call.
    pub fn invoke<L: Logger>(&self, data: &ProvisionData) {
        match self.callback.0.as_deref() {
            Some(cb) => cb(data),
            None => L::log(PROVISION_CB_IS_NULL),
        }
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_set()
    }
    pub fn set_callback(&mut self, callback: ProvisionCallback<'a>) {
        self.callback = callback;
    }

    /// Provisioning key of the device profile the device is created under
    pub fn device_key(&self) -> Option<&'a str> {
        self.device_key
    }
    pub fn set_device_key(&mut self, device_key: Option<&'a str>) {
        self.device_key = device_key;
    }

    /// Provisioning secret of the device profile the device is created under
    pub fn device_secret(&self) -> Option<&'a str> {
        self.device_secret
    }
    pub fn set_device_secret(&mut self, device_secret: Option<&'a str>) {
        self.device_secret = device_secret;
    }

    /// Name of the device on the cloud, `None` or empty if the access token is used instead
    pub fn device_name(&self) -> Option<&'a str> {
        self.device_name
    }
    pub fn set_device_name(&mut self, device_name: Option<&'a str>) {
        self.device_name = device_name;
    }

    pub fn device_access_token(&self) -> Option<&'a str> {
        self.access_token
    }
    pub fn set_device_access_token(&mut self, access_token: Option<&'a str>) {
        self.access_token = access_token;
    }

    pub fn credentials_username(&self) -> Option<&'a str> {
        self.cred_username
    }
    pub fn set_credentials_username(&mut self, username: Option<&'a str>) {
        self.cred_username = username;
    }

    pub fn credentials_password(&self) -> Option<&'a str> {
        self.cred_password
    }
    pub fn set_credentials_password(&mut self, password: Option<&'a str>) {
        self.cred_password = password;
    }

    pub fn credentials_client_id(&self) -> Option<&'a str> {
        self.cred_client_id
    }
    pub fn set_credentials_client_id(&mut self, client_id: Option<&'a str>) {
        self.cred_client_id = client_id;
    }

    /// Public X.509 certificate hash
    pub fn certificate_hash(&self) -> Option<&'a str> {
        self.hash
    }
    pub fn set_certificate_hash(&mut self, hash: Option<&'a str>) {
        self.hash = hash;
    }

    /// Strategy the request was built with, fixed at construction
    pub fn credentials_type(&self) -> CredentialsType {
        self.credentials_type
    }

    /// `credentialsType` label sent to the server, `None` for server generated credentials
    pub fn credentials_type_label(&self) -> Option<&'static str> {
        self.credentials_type.label()
    }

    /// Checks that the profile key and secret are present and that exactly the fields of the
    /// credentials type are populated. Never called implicitly.
    pub fn validate(&self) -> Result<(), ProvisionError> {
        require("provisionDeviceKey", self.device_key)?;
        require("provisionDeviceSecret", self.device_secret)?;
        let credential_fields = [
            (
                "token",
                self.access_token,
                CredentialsType::DeviceAccessToken,
            ),
            (
                "username",
                self.cred_username,
                CredentialsType::BasicCredentials,
            ),
            (
                "password",
                self.cred_password,
                CredentialsType::BasicCredentials,
            ),
            (
                "clientId",
                self.cred_client_id,
                CredentialsType::BasicCredentials,
            ),
            ("hash", self.hash, CredentialsType::X509Certificate),
        ];
        for (field, value, owner) in credential_fields {
            if owner == self.credentials_type {
                require(field, value)?;
            } else if value.is_some() {
                return Err(ProvisionError::UnexpectedField {
                    field,
                    credentials_type: self.credentials_type,
                });
            }
        }
        Ok(())
    }
}

fn require(field: &'static str, value: Option<&str>) -> Result<(), ProvisionError> {
    match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(ProvisionError::MissingField(field)),
    }
}
