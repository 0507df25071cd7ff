//! # Multiverse Explorer
//!
//! > **Client-side browsing state for the Rick and Morty API.**
//!
//! This crate fetches paginated characters and locations from a remote read-only API,
//! filters and sorts them locally, resolves cross-entity references (character → origin,
//! location → residents), and keeps per-view pagination and loading state. Rendering is
//! someone else's job: a UI reads [`ViewSnapshot`](lifecycle::ViewSnapshot)s and sends back
//! [`Intent`](lifecycle::Intent)s.
//!
//! ## 🏗️ Design
//!
//! ### Explicit state machines
//! Each route gets its own view state (`Idle → Loading → {Ready, Failed}`). Data lives
//! inside the `Ready` variant, so a failed view has nothing stale to show.
//!
//! ### Request tokens instead of cancellation
//! Fetches are issued as [`PendingFetch`](lifecycle::PendingFetch) values carrying a
//! `(view, generation)` token. A completion is applied only if its token is still current,
//! so a slow response for an old page or an unmounted view is dropped on arrival.
//!
//! ### Pure derivation
//! The displayed character list is recomputed by [`view::filter::apply`], a pure function
//! over the page in memory. Changing the query, status filter or sort never re-fetches.
//!
//! ### Partial failure is local
//! [`ReferenceResolver`](clients::ReferenceResolver) resolves references concurrently.
//! A failed reference becomes an unresolved slot; the owning view stays `Ready` and the
//! reported resident count is unaffected.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Transport ([`framework`])
//! - **Role**: One GET, one JSON document. `reqwest` in production, a mock in tests.
//! - **Key items**: [`Transport`](framework::Transport), [`FetchFailed`](framework::FetchFailed).
//!
//! ### 2. The Data ([`model`])
//! - **Role**: `Character`, `Location`, `Reference` and `Page<T>` as the API reports them.
//!
//! ### 3. The Clients ([`clients`])
//! - **Role**: Typed fetches by page, id and URL; concurrent reference resolution.
//! - **Key items**: [`EntityClient`](clients::EntityClient), [`ReferenceResolver`](clients::ReferenceResolver).
//!
//! ### 4. The Views ([`view`])
//! - **Role**: Filter/sort, pagination and the per-route state machines.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! - **Role**: Mounts one view per route, routes intents and completions, builds snapshots.
//! - **Key items**: [`Navigator`](lifecycle::Navigator), [`ExplorerConfig`](lifecycle::ExplorerConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Browse the public API with info logs
//! RUST_LOG=info cargo run
//!
//! # Point at another deployment
//! EXPLORER_API_URL=http://localhost:8080/api RUST_LOG=debug cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod view;
