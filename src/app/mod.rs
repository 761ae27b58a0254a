pub mod gateway;
pub mod handler;
pub mod server;

pub use handler::{FunctionResponse, GrantFunction};
