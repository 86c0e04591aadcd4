// Database module
pub mod connection;
pub mod repositories;
pub mod storage;

pub use connection::*;
pub use repositories::*;
pub use storage::*;
