//! Shared building blocks: errors, configuration and frame accounting.

pub mod config;
pub mod error;
pub mod fps;
