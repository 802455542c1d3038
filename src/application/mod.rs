//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! which tab is shown, which pet is selected, the open application form and
//! the appointment list.

pub mod details;
pub mod state;

pub use details::*;
pub use state::*;
