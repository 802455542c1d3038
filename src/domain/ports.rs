//! Persistence port used by the appointment store.
//!
//! The store only ever sees string records under a handful of keys. Adapters
//! in the infrastructure layer decide where those records live.

use super::errors::DomainResult;

/// Key under which the appointment collection is stored.
pub const APPOINTMENTS_KEY: &str = "appointments";
/// Key under which the pet collection is stored.
pub const PETS_KEY: &str = "pets";

/// Synchronous key-value storage for serialized collections.
pub trait StoragePort: std::fmt::Debug {
    /// Returns the record stored under `key`, or `None` if nothing was saved yet.
    fn load(&self, key: &str) -> DomainResult<Option<String>>;

    /// Replaces the record stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> DomainResult<()>;
}

impl<S: StoragePort + ?Sized> StoragePort for Box<S> {
    fn load(&self, key: &str) -> DomainResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> DomainResult<()> {
        (**self).save(key, value)
    }
}
