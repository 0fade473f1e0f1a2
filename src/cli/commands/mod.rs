//! CLI command implementations

pub mod config;
pub mod dev;
pub mod fit;
