use crate::model::{ApiEntity, Collection, Reference};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// A location record from `/location`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub dimension: String,
    #[serde(rename = "residents", default)]
    pub resident_refs: Vec<String>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Location {
    /// Residents as unresolved references, in source order.
    pub fn resident_references(&self) -> Vec<Reference> {
        self.resident_refs.iter().map(Reference::to_url).collect()
    }

    /// Number of residents the source reports, independent of resolution.
    pub fn resident_count(&self) -> usize {
        self.resident_refs.len()
    }

    pub fn created_date(&self) -> NaiveDate {
        self.created.date_naive()
    }
}

impl ApiEntity for Location {
    const COLLECTION: Collection = Collection::Location;

    fn id(&self) -> u32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::location_json;

    #[test]
    fn test_decode_location_payload() {
        let loc: Location = serde_json::from_value(location_json(3, "Citadel of Ricks", &[8, 14])).unwrap();
        assert_eq!(loc.kind, "Planet");
        assert_eq!(loc.resident_count(), 2);
        assert_eq!(
            loc.created_date(),
            NaiveDate::from_ymd_opt(2017, 11, 10).unwrap()
        );

        let refs = loc.resident_references();
        assert_eq!(refs[0].target(), Some((Collection::Character, 8)));
        assert_eq!(refs[1].target_id(), Some(14));
    }
}
