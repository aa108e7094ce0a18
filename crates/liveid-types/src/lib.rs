#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod constants;
pub mod error;
pub mod record;

pub use constants::*;
pub use error::*;
pub use record::*;
