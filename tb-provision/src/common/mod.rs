//! Provisioning building blocks.
//!
//! # Modules
//! - [provisioning]: credential strategies, the request and its payload
//! - [log]: logging capability handed to [provisioning::request::ProvisionRequest::invoke]

pub mod log;
pub mod provisioning;
