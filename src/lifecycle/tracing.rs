//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The compact format hides the module prefix (`with_target(false)`); structured
//! fields (`collection`, `view`, `generation`, `page`) carry the context instead.
//!
//! ## What Gets Traced
//!
//! - **Requests**: every GET at `debug`, failures at `warn`
//! - **Pages**: page number, total pages and item count when a page lands
//! - **Resolution**: resolved / unresolved / remaining counts per preview
//! - **Views**: navigation, ignored intents, rejected page changes, discarded completions
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show every request and recomputation
//! RUST_LOG=debug cargo run
//!
//! # Filter to specific modules
//! RUST_LOG=multiverse_explorer::clients=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Navigating route=/ view=view#1
//! INFO fetch_page: Fetched page page=1 total_pages=42 items=20
//! INFO Page ready view=view#1 page=1 items=20
//! INFO Navigating route=/location/1 view=view#2
//! INFO resolve_preview: Preview resolved resolved=6 unresolved=0 remaining=21
//! INFO Detail ready view=view#2 id=1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
