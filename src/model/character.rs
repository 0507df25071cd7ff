use crate::model::{ApiEntity, Collection, Reference};
use serde::Deserialize;
use std::fmt;

/// Normalized character status used for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Alive,
    Dead,
    Unknown,
}

impl StatusKind {
    /// Case-insensitive parse. Anything unrecognized is `Unknown`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "alive" => StatusKind::Alive,
            "dead" => StatusKind::Dead,
            _ => StatusKind::Unknown,
        }
    }
}

/// A character's status: the normalized kind plus the label exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct Status {
    kind: StatusKind,
    label: String,
}

impl Status {
    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    /// Original casing, for display.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl From<String> for Status {
    fn from(label: String) -> Self {
        Self {
            kind: StatusKind::parse(&label),
            label,
        }
    }
}

impl From<&str> for Status {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A character record from `/character`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub status: Status,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub gender: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub image: String,
    pub origin: Reference,
    pub location: Reference,
    #[serde(rename = "episode", default)]
    pub episode_refs: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Character {
    /// The `type` field, or "Unknown" when the source left it empty.
    pub fn display_type(&self) -> &str {
        if self.kind.trim().is_empty() {
            "Unknown"
        } else {
            &self.kind
        }
    }

    pub fn episode_count(&self) -> usize {
        self.episode_refs.len()
    }

    /// Location id to navigate to from the origin, if navigable.
    pub fn origin_id(&self) -> Option<u32> {
        self.origin.target_id()
    }

    /// Location id to navigate to from the last known location, if navigable.
    pub fn location_id(&self) -> Option<u32> {
        self.location.target_id()
    }
}

impl ApiEntity for Character {
    const COLLECTION: Collection = Collection::Character;

    fn id(&self) -> u32 {
        self.id
    }
}
