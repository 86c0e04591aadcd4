// Shared middleware (extractors, guards)
pub mod auth;
pub mod ownership;

pub use auth::*;
pub use ownership::*;
