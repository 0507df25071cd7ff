//! # Framework Errors
//!
//! This module defines the error types shared by every layer that talks to the
//! remote API. By centralizing them, a failure reported by the transport keeps its
//! classification all the way up to the view that surfaces it.

use crate::model::Collection;
use thiserror::Error;

/// Errors produced by a [`Transport`](crate::framework::Transport) for a single GET.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// The request never produced a response (DNS, connection, TLS...).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status code.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// The body could not be read as JSON.
    #[error("Response body is not JSON: {0}")]
    Decode(String),
}

/// Why a fetch against a collection failed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchFailure {
    /// The request was rejected before reaching the network (page 0, id 0, bad URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The transport could not deliver a JSON document.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The JSON document did not match the expected entity shape.
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

/// A primary fetch (page, id or URL) failed.
///
/// Surfaced to the owning view as its `Failed` state. It is never retried
/// automatically.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Failed to fetch {collection}: {reason}")]
pub struct FetchFailed {
    pub collection: Collection,
    pub reason: FetchFailure,
}

impl FetchFailed {
    pub fn new(collection: Collection, reason: impl Into<FetchFailure>) -> Self {
        Self {
            collection,
            reason: reason.into(),
        }
    }

    pub fn invalid_request(collection: Collection, msg: impl Into<String>) -> Self {
        Self::new(collection, FetchFailure::InvalidRequest(msg.into()))
    }

    /// Message suitable for showing in place of the failed view.
    pub fn user_message(&self) -> String {
        format!("Failed to fetch {}.", self.collection.plural())
    }

    /// Message for a failed single-entity view.
    pub fn detail_message(&self) -> String {
        format!("Failed to fetch {} details.", self.collection.path())
    }
}
