//! Error handling.
//!
//! This module provides:
//! - Error type definitions for configuration, validation, transport and parsing
//! - Categorization of reqwest errors into transport failure kinds
//!
//! Propagation policy:
//! - **Config/validation errors** fail fast as `Err` from every public verb
//! - **Transport failures** become a failure envelope (`ok == false`, status 400)
//! - **Parse errors** surface only from the lazy `json()` accessor

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{
    ConfigError, InitializationError, ParseError, RequestError, TransportErrorKind,
    TransportFailure, ValidationError,
};
