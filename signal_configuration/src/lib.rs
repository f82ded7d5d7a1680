//! Compiled-in configuration values for talking to the Signal service

mod common;
mod prod;

pub use common::*;
pub use prod::*;
