// Posts domain models
pub mod post;

pub use post::*;
