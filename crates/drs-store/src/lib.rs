//! Document storage for the DRS registry.
//!
//! The registry engine never touches a database directly. It talks to the two
//! traits defined here, which capture exactly the document-store operations it
//! needs: find, insert (with a duplicate-key signal), whole-document replace
//! with optional upsert, conditional updates on elements of an object's
//! `access_methods` array, and delete.
//!
//! # Storage Backends
//!
//! - [`InMemoryObjectStore`] / [`InMemoryServiceInfoStore`] -- `RwLock`-guarded
//!   maps for tests, embedding, and single-process deployments
//!
//! No persistent backend ships with this crate. Everything held by the
//! in-memory stores is lost when the process exits; a durable deployment
//! implements [`ObjectStore`] and [`ServiceInfoStore`] over its own database
//! and hands them to the registry.
//!
//! # Design Rules
//!
//! 1. The store exclusively owns durable state; callers hold copies only for
//!    the duration of one operation.
//! 2. `id` is a unique key. A conflicting insert fails with
//!    [`StoreError::DuplicateKey`] and leaves the existing document untouched.
//! 3. Every conditional update is atomic: the match and the mutation happen
//!    under one critical section, and the result reports how many documents
//!    or elements were affected.
//! 4. All backend failures are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryObjectStore, InMemoryServiceInfoStore};
pub use traits::{ObjectStore, ReplaceOutcome, ServiceInfoStore};
