//! # ApiEntity Trait
//!
//! The `ApiEntity` trait is the contract every record type (Character, Location) must
//! satisfy to be fetched by the generic [`EntityClient`](crate::clients::EntityClient).
//! It ties a Rust type to the remote collection it lives in, so a `Character` can
//! only ever be requested from `/character` and decoded from that collection's payloads.

use serde::de::DeserializeOwned;
use std::fmt::{self, Debug, Display};

/// Remote collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Character,
    Location,
}

impl Collection {
    /// Path segment under the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Collection::Character => "character",
            Collection::Location => "location",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Collection::Character => "characters",
            Collection::Location => "locations",
        }
    }

    /// Inverse of [`Collection::path`].
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "character" => Some(Collection::Character),
            "location" => Some(Collection::Location),
            _ => None,
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// Trait that any record fetched from the API must implement.
///
/// We use an associated constant rather than a runtime argument so that the
/// collection a type is fetched from is fixed at compile time.
pub trait ApiEntity: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// The remote collection holding this entity.
    const COLLECTION: Collection;

    /// Identity assigned by the source. Always positive.
    fn id(&self) -> u32;
}
