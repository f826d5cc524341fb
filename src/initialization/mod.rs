//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - HTTP transports (direct, or per proxy / redirect / TLS policy)
//! - The process logger used by the CLI

mod client;
mod logger;

// Re-export public API
pub use client::{init_client, init_transport, TransportOptions};
pub use logger::init_logger_with;
