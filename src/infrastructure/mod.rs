//! Infrastructure layer providing external service integrations.
//!
//! This module contains the storage adapters behind the store's persistence
//! port, CSV export, configuration and logging setup.

pub mod config;
pub mod export;
pub mod logger;
pub mod persistence;

pub use config::*;
pub use export::*;
pub use logger::*;
pub use persistence::*;
