//! Object and access-method lifecycle engine for the DRS registry.
//!
//! This crate owns the rules for registering data objects and their access
//! methods on top of any [`ObjectStore`](drs_store::ObjectStore):
//!
//! - **Identifier generation** ([`charset`], [`id`]) -- random ids drawn from a
//!   configured character set, resolved through a fixed table of classes.
//! - **Bounded retry** ([`retry`]) -- optimistic concurrency for random ids:
//!   on a collision draw again, at most `retries + 1` times.
//! - **Registration** ([`object`], [`access`], [`allocator`]) -- create vs.
//!   replace for whole objects and for single access methods.
//! - **Lifecycle guard** ([`lifecycle`]) -- lookups, deletes, and the
//!   at-least-one-access-method invariant.
//! - **Service info** ([`service_info`]) -- the singleton instance descriptor.
//!
//! The engine is stateless between calls. Every function takes its store and
//! configuration explicitly; [`Registry`] merely bundles them.

pub mod access;
pub mod allocator;
pub mod charset;
pub mod config;
pub mod error;
pub mod id;
pub mod lifecycle;
pub mod object;
pub mod registry;
pub mod retry;
pub mod service_info;

#[cfg(test)]
mod testing;

pub use access::{register_access_method, AccessOutcome};
pub use allocator::allocate_access_ids;
pub use charset::{CharClass, CharsetSpec, ResolvedCharset};
pub use config::{IdConfig, RegistryConfig, UriConfig};
pub use error::{ErrorKind, IdError, RegistryError, RegistryResult};
pub use id::{generate_id, generate_id_with};
pub use lifecycle::{delete_access_method, delete_object, get_access_url, get_object};
pub use object::{register_object, ObjectOutcome, Registered};
pub use registry::Registry;
pub use retry::{retry, Attempt};
pub use service_info::{bootstrap_service_info, get_service_info, set_service_info};
