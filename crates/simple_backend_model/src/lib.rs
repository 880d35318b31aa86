#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

//! Database storage helpers for simple value types.

pub mod time;
pub use time::*;

mod macros;

