//! Device provisioning requests for a ThingsBoard MQTT client.
//!
//! A device that is not yet registered sends a provisioning request naming a
//! device profile (key and secret) and one credential strategy. When the
//! server answers, the transport layer hands the decoded response to
//! [`ProvisionRequest::invoke`], which fires the callback registered at
//! construction.
//!
//! ```
//! use tb_provision::{LogFacade, ProvisionCallback, ProvisionData, ProvisionRequest};
//!
//! let request = ProvisionRequest::with_basic_credentials(
//!     ProvisionCallback::new(|data: &ProvisionData| {
//!         println!("provisioned: {:?}", data.get("status"));
//!     }),
//!     "profile-key",
//!     "profile-secret",
//!     "user",
//!     "pass",
//!     "client",
//!     Some("weather-station"),
//! );
//! assert_eq!(request.credentials_type_label(), Some("MQTT_BASIC"));
//! request.invoke::<LogFacade>(&ProvisionData::new());
//! ```

pub mod common;

pub use common::log::{LogFacade, Logger};
#[cfg(feature = "settings")]
pub use common::provisioning::settings::{CredentialsSettings, ProvisionSettings};
pub use common::provisioning::{
    request::{ProvisionCallback, ProvisionRequest},
    CredentialsType, ProvisionData, ProvisionError,
};
