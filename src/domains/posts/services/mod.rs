// Posts domain services
pub mod post_service;
pub mod state;

pub use post_service::*;
pub use state::*;
