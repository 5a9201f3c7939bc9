//! Foundation types for the DRS registry.
//!
//! This crate provides the record types shared by every other DRS crate: the
//! registered data object, its nested access methods, and the singleton
//! service-info document describing the running instance.
//!
//! # Key Types
//!
//! - [`DrsObject`]: A registered data object with a derived self URI
//! - [`AccessMethod`]: One way of retrieving an object's bytes, keyed by `access_id`
//! - [`AccessUrl`]: The URL plus headers an access method resolves to
//! - [`ServiceInfo`]: GA4GH service-info document for this instance

pub mod access;
pub mod error;
pub mod object;
pub mod service_info;

pub use access::{AccessMethod, AccessUrl};
pub use error::TypeError;
pub use object::DrsObject;
pub use service_info::{Organization, ServiceInfo, ServiceType};
