// All repositories module
pub mod auth;
pub mod posts;

// Re-export all repositories for convenience
pub use auth::*;
pub use posts::*;
