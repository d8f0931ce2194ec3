//! CLI command implementations.

pub mod config;
pub mod courses;
pub mod init;
