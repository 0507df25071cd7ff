//! Type-safe clients over a [`Transport`](crate::framework::Transport).

pub mod entity_client;
pub mod resolver;

pub use entity_client::*;
pub use resolver::*;
