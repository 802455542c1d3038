//! pawbook - Pet Adoption Library
//!
//! Pet catalog, adoption application form and appointment store behind a
//! pluggable storage port, with a ratatui front end.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
