//! Runtime orchestration.
//!
//! This module contains the infrastructure around the views:
//!
//! - **Navigation**: mounting one view per route and routing intents and completions to it
//! - **Configuration**: API base URL, preview size and page window spans
//! - **Observability setup**: initializing tracing and logging
//!
//! # Main Components
//!
//! - [`Navigator`] - Owns the current view and turns intents into fetches
//! - [`ExplorerConfig`] - Runtime configuration, with environment overrides
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod navigator;
pub mod tracing;

pub use config::*;
pub use navigator::*;
pub use self::tracing::*;
