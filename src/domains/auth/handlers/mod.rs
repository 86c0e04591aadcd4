// Auth domain handlers
pub mod auth_handler;
pub mod user_handler;
pub mod webhook_handler;
