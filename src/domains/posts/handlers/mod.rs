// Posts domain handlers
pub mod post_handler;
