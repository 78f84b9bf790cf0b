pub mod domain;
pub mod err;
pub mod rpc;
pub mod utils;

pub use err::{ErrorOrigin, SnapError, StatusCode};
