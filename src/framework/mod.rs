//! Transport layer for the remote, read-only API.
//!
//! This module provides the building blocks every client sits on: a JSON-over-GET
//! [`Transport`] seam, its HTTP implementation, and the shared error types.
//!
//! # Main Components
//!
//! - [`Transport`] - Trait for issuing a single GET and decoding JSON
//! - [`HttpTransport`] - `reqwest` implementation used by the binary
//! - [`FetchFailed`] / [`TransportError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for a transport driven by queued expectations.

pub mod error;
pub mod mock;
pub mod transport;

// Re-export core types for convenience
pub use error::*;
pub use transport::*;
