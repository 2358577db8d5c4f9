//! CLI command implementations.

pub mod convert;
pub mod vas;
