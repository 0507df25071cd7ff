//! # View State Machine
//!
//! Every view moves through `Idle → Loading → {Ready, Failed}`. The data lives
//! *inside* the state ([`LoadState`]), so a failed view cannot keep showing stale data.
//!
//! ## Request tokens
//!
//! A fetch is issued with a [`RequestToken`] (view id + generation) and its
//! completion is applied only if the [`RequestGuard`] still accepts that token.
//! Issuing a new request bumps the generation, so a slow response for an older
//! page lands on a guard that has moved on and is dropped. Navigating away
//! creates a new view id, so nothing addressed to the old view can be applied.

use crate::framework::FetchFailed;

/// Identity of one mounted view. A new id is allocated on every navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Identifies the request a completion answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    pub view: ViewId,
    pub generation: u64,
}

/// Tracks the latest request issued by one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestGuard {
    view: ViewId,
    generation: u64,
}

impl RequestGuard {
    pub fn new(view: ViewId) -> Self {
        Self { view, generation: 0 }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Supersedes every previously issued token.
    pub fn issue(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken {
            view: self.view,
            generation: self.generation,
        }
    }

    pub fn accepts(&self, token: &RequestToken) -> bool {
        token.view == self.view && token.generation == self.generation
    }
}

/// Coarse status exposed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Data-carrying view state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(FetchFailed),
}

impl<T> LoadState<T> {
    pub fn status(&self) -> ViewStatus {
        match self {
            LoadState::Idle => ViewStatus::Idle,
            LoadState::Loading => ViewStatus::Loading,
            LoadState::Ready(_) => ViewStatus::Ready,
            LoadState::Failed(_) => ViewStatus::Failed,
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchFailed> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Replace the state with the outcome of a fetch.
    pub fn settle(&mut self, result: Result<T, FetchFailed>) {
        *self = match result {
            Ok(data) => LoadState::Ready(data),
            Err(e) => LoadState::Failed(e),
        };
    }
}
