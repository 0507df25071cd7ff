//! Page-local filtering and ordering of characters.
//!
//! Everything here is a pure function of its inputs: it never fetches, never
//! spans pages, and never mutates the page it is given.

use crate::model::{Character, StatusKind};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Status predicate selectable by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Alive,
    Dead,
    Unknown,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Alive,
        StatusFilter::Dead,
        StatusFilter::Unknown,
    ];

    pub fn matches(self, status: StatusKind) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Alive => status == StatusKind::Alive,
            StatusFilter::Dead => status == StatusKind::Dead,
            StatusFilter::Unknown => status == StatusKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// User-controlled criteria for a character list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewFilterCriteria {
    pub query: String,
    pub status_filter: StatusFilter,
    pub sort_direction: SortDirection,
}

/// Text predicate derived from a raw query string.
#[derive(Debug, Clone, PartialEq, Eq)]
enum QueryMatch {
    Any,
    /// `None` when the digits do not fit an id; matches nothing.
    Id(Option<u32>),
    NameContains(String),
}

impl QueryMatch {
    fn parse(query: &str) -> Self {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            QueryMatch::Any
        } else if is_numeric(trimmed) {
            QueryMatch::Id(trimmed.strip_prefix('+').unwrap_or(trimmed).parse().ok())
        } else {
            QueryMatch::NameContains(trimmed.to_lowercase())
        }
    }

    fn matches(&self, character: &Character) -> bool {
        match self {
            QueryMatch::Any => true,
            QueryMatch::Id(id) => *id == Some(character.id),
            QueryMatch::NameContains(needle) => character.name.to_lowercase().contains(needle),
        }
    }
}

/// An optional sign followed by ASCII digits only.
fn is_numeric(query: &str) -> bool {
    let digits = query.strip_prefix(&['+', '-'][..]).unwrap_or(query);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Primary collation key: accents stripped, case folded.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Locale-aware name ordering.
///
/// Base letters decide first, so `Á` sorts with `a`. Ties fall back to accents
/// (unaccented first), then case (lowercase first).
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Derive the displayed subset of `items` for `criteria`.
///
/// A numeric query matches `id` exactly and never falls back to a name match.
/// Status and text predicates are ANDed. Sorting is stable; descending order
/// reverses the comparator so equal names keep their input order.
pub fn apply(items: &[Character], criteria: &ViewFilterCriteria) -> Vec<Character> {
    let query = QueryMatch::parse(&criteria.query);
    let mut view: Vec<Character> = items
        .iter()
        .filter(|c| query.matches(c) && criteria.status_filter.matches(c.status.kind()))
        .cloned()
        .collect();

    match criteria.sort_direction {
        SortDirection::Ascending => view.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortDirection::Descending => view.sort_by(|a, b| compare_names(&b.name, &a.name)),
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::character_json;

    fn character(id: u32, name: &str, status: &str) -> Character {
        serde_json::from_value(character_json(id, name, status)).unwrap()
    }

    fn names(items: &[Character]) -> Vec<&str> {
        items.iter().map(|c| c.name.as_str()).collect()
    }

    fn criteria(query: &str, status_filter: StatusFilter, sort_direction: SortDirection) -> ViewFilterCriteria {
        ViewFilterCriteria {
            query: query.to_string(),
            status_filter,
            sort_direction,
        }
    }

    #[test]
    fn test_numeric_query_matches_id_exactly() {
        let page = vec![
            character(5, "Jerry Smith", "Alive"),
            character(15, "Alien Rick", "unknown"),
            character(55, "5 Headed Morty", "Alive"),
        ];
        let out = apply(&page, &criteria("5", StatusFilter::All, SortDirection::Ascending));
        assert_eq!(names(&out), ["Jerry Smith"]);

        let out = apply(&page, &criteria(" 7 ", StatusFilter::All, SortDirection::Ascending));
        assert!(out.is_empty());
    }

    #[test]
    fn test_numeric_query_never_falls_back_to_name() {
        let page = vec![
            character(1, "Morty 99999999999999999999", "Alive"),
            character(2, "Rick -3", "Alive"),
        ];
        for q in ["99999999999999999999", "-3", "+0"] {
            let out = apply(&page, &criteria(q, StatusFilter::All, SortDirection::Ascending));
            assert!(out.is_empty(), "query {q:?} matched {:?}", names(&out));
        }

        let out = apply(&page, &criteria("+2", StatusFilter::All, SortDirection::Ascending));
        assert_eq!(names(&out), ["Rick -3"]);

        // A sign alone or mixed text is a name query.
        let out = apply(&page, &criteria("-", StatusFilter::All, SortDirection::Ascending));
        assert_eq!(names(&out), ["Rick -3"]);
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let page = vec![
            character(1, "Zeep Xanflorp", "Alive"),
            character(2, "Ábradolf Lincler", "unknown"),
            character(3, "Beth Smith", "Alive"),
            character(4, "Abradolf Lincler", "unknown"),
        ];
        let asc = apply(&page, &criteria("", StatusFilter::All, SortDirection::Ascending));
        assert_eq!(
            names(&asc),
            ["Abradolf Lincler", "Ábradolf Lincler", "Beth Smith", "Zeep Xanflorp"]
        );

        let desc = apply(&page, &criteria("", StatusFilter::All, SortDirection::Descending));
        assert_eq!(
            names(&desc),
            ["Zeep Xanflorp", "Beth Smith", "Ábradolf Lincler", "Abradolf Lincler"]
        );
    }

    #[test]
    fn test_case_only_differences_put_lowercase_first() {
        assert_eq!(compare_names("rick", "Rick"), Ordering::Less);
        assert_eq!(compare_names("Rick", "rick"), Ordering::Greater);
        assert_eq!(compare_names("Rick", "Rick"), Ordering::Equal);
    }

    #[test]
    fn test_text_query_is_case_insensitive() {
        let page = vec![
            character(2, "Morty Smith", "Alive"),
            character(3, "Summer Smith", "Alive"),
        ];
        for q in ["morty", "MORTY", "  mOrTy "] {
            let out = apply(&page, &criteria(q, StatusFilter::All, SortDirection::Ascending));
            assert_eq!(names(&out), ["Morty Smith"]);
        }
    }

    #[test]
    fn test_blank_query_keeps_everything() {
        let page = vec![character(1, "Rick Sanchez", "Alive"), character(2, "Morty Smith", "Alive")];
        let out = apply(&page, &criteria("   ", StatusFilter::All, SortDirection::Ascending));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_status_and_text_are_anded() {
        let page = vec![
            character(1, "Rick Sanchez", "Alive"),
            character(8, "Adjudicator Rick", "Dead"),
            character(2, "Morty Smith", "Dead"),
        ];
        let out = apply(&page, &criteria("rick", StatusFilter::Dead, SortDirection::Ascending));
        assert_eq!(names(&out), ["Adjudicator Rick"]);
    }

    #[test]
    fn test_sort_directions() {
        let page = vec![
            character(3, "Morty", "Alive"),
            character(1, "Rick", "Alive"),
            character(2, "Beth", "Alive"),
        ];
        let asc = apply(&page, &criteria("", StatusFilter::All, SortDirection::Ascending));
        assert_eq!(names(&asc), ["Beth", "Morty", "Rick"]);
        let desc = apply(&page, &criteria("", StatusFilter::All, SortDirection::Descending));
        assert_eq!(names(&desc), ["Rick", "Morty", "Beth"]);
    }

    #[test]
    fn test_equal_names_keep_input_order_both_ways() {
        let page = vec![
            character(10, "Rick Sanchez", "Alive"),
            character(1, "Beth", "Alive"),
            character(20, "Rick Sanchez", "Dead"),
        ];
        let mut c = criteria("", StatusFilter::All, SortDirection::Ascending);
        let asc = apply(&page, &c);
        let ids: Vec<u32> = asc.iter().map(|c| c.id).collect();
        assert_eq!(ids, [1, 10, 20]);

        c.sort_direction = c.sort_direction.toggled();
        let ids: Vec<u32> = apply(&page, &c).iter().map(|c| c.id).collect();
        assert_eq!(ids, [10, 20, 1]);

        c.sort_direction = c.sort_direction.toggled();
        assert_eq!(apply(&page, &c), asc);
    }

    #[test]
    fn test_output_is_subsequence_and_idempotent() {
        let page = vec![
            character(1, "Rick Sanchez", "Alive"),
            character(2, "Morty Smith", "Alive"),
            character(3, "Summer Smith", "Alive"),
            character(4, "Beth Smith", "Alive"),
            character(5, "Jerry Smith", "Alive"),
            character(6, "Abadango Cluster Princess", "Alive"),
            character(7, "Abradolf Lincler", "unknown"),
            character(8, "Adjudicator Rick", "Dead"),
        ];
        for status_filter in StatusFilter::ALL {
            for query in ["", "smith", "rick", "3", "zzz"] {
                for sort_direction in [SortDirection::Ascending, SortDirection::Descending] {
                    let c = criteria(query, status_filter, sort_direction);
                    let once = apply(&page, &c);
                    assert!(once.iter().all(|item| page.contains(item)));
                    assert_eq!(apply(&once, &c), once);
                }
            }
        }
    }
}
