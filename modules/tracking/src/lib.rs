#![forbid(clippy::unwrap_used)]
#![forbid(unsafe_code)]
#![forbid(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod entities;
pub mod error;
pub mod services;
pub mod utils;

pub use error::Error;
