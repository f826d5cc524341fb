//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (content types, failure status, defaults)
//! - Client-wide settings
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{ClientSettings, LogFormat, LogLevel, Opt, Verb};
