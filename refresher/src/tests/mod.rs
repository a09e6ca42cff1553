pub mod common;
pub mod server;
pub mod workers;
