//! Shared configuration, constants and error types for the Kalends crates.

pub mod config;
pub mod constants;
pub mod error;
