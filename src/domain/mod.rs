pub mod models;
pub mod services;
pub mod errors;
pub mod form;
pub mod ports;
pub mod seed;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use form::*;
pub use ports::*;
pub use seed::*;
