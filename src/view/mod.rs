//! Per-route presentation state.
//!
//! - [`filter`]: pure filter/sort over one page of characters
//! - [`pagination`]: current/total page and the windowed page selector
//! - [`state`]: the `Idle → Loading → {Ready, Failed}` machine and request tokens
//! - [`list`] / [`detail`]: the four concrete views composed from the above

pub mod detail;
pub mod filter;
pub mod list;
pub mod pagination;
pub mod state;

pub use detail::*;
pub use filter::{SortDirection, StatusFilter, ViewFilterCriteria};
pub use list::*;
pub use pagination::*;
pub use state::*;
