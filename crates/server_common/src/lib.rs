#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

//! Error types shared between server crates.

pub mod app;
pub mod data;
pub mod result;
