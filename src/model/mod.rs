//! Pure data structures decoded from the API, and the [`ApiEntity`] trait they implement.

pub mod character;
pub mod entity;
pub mod location;
pub mod page;
pub mod reference;

pub use character::*;
pub use entity::*;
pub use location::*;
pub use page::*;
pub use reference::*;
