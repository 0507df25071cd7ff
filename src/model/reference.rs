use crate::model::Collection;
use serde::Deserialize;
use url::Url;

/// A weak pointer to another entity, embedded inside its owner.
///
/// A reference is *not* an entity. Dereferencing it is a separate, fallible
/// operation performed by [`ReferenceResolver`](crate::clients::ReferenceResolver).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawReference")]
pub struct Reference {
    pub display_name: String,
    pub source_url: Option<String>,
}

/// Wire shape: `{ "name": "...", "url": "" }`. An empty URL means "unknown".
#[derive(Deserialize)]
struct RawReference {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: Option<String>,
}

impl From<RawReference> for Reference {
    fn from(raw: RawReference) -> Self {
        Self::new(raw.name, raw.url)
    }
}

impl Reference {
    /// Creates a reference. Blank URLs are stored as `None`.
    pub fn new(display_name: impl Into<String>, source_url: Option<String>) -> Self {
        Self {
            display_name: display_name.into(),
            source_url: source_url.filter(|u| !u.trim().is_empty()),
        }
    }

    /// A reference known only by its URL (e.g. a location's resident list).
    pub fn to_url(url: impl Into<String>) -> Self {
        Self::new(String::new(), Some(url.into()))
    }

    /// Collection and numeric id encoded in the URL path (`.../location/5`).
    pub fn target(&self) -> Option<(Collection, u32)> {
        let url = Url::parse(self.source_url.as_deref()?).ok()?;
        let mut segments = url.path_segments()?.filter(|s| !s.is_empty()).rev();
        let id = segments.next()?.parse::<u32>().ok().filter(|id| *id > 0)?;
        let collection = Collection::from_path(segments.next()?)?;
        Some((collection, id))
    }

    /// Numeric id used for navigation, if the reference is navigable.
    pub fn target_id(&self) -> Option<u32> {
        self.target().map(|(_, id)| id)
    }

    pub fn is_navigable(&self) -> bool {
        self.target().is_some()
    }
}
