//! Single-entity views reached by id.

use crate::clients::ResolvedPreview;
use crate::framework::FetchFailed;
use crate::model::{Character, Location};
use crate::view::state::{LoadState, RequestGuard, RequestToken, ViewId, ViewStatus};
use chrono::NaiveDate;
use tracing::{info, warn};

/// A location together with the preview of its resolved residents.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDetail {
    pub location: Location,
    pub residents: ResolvedPreview<Character>,
}

impl LocationDetail {
    /// Residents the location reports, regardless of how many resolved.
    pub fn resident_count(&self) -> usize {
        self.location.resident_count()
    }

    pub fn created_date(&self) -> NaiveDate {
        self.location.created_date()
    }
}

/// State for a view showing one entity (plus whatever was resolved for it).
#[derive(Debug, Clone)]
pub struct DetailView<D> {
    entity_id: u32,
    guard: RequestGuard,
    state: LoadState<D>,
}

pub type CharacterDetailView = DetailView<Character>;
pub type LocationDetailView = DetailView<LocationDetail>;

impl<D> DetailView<D> {
    pub fn new(view: ViewId, entity_id: u32) -> Self {
        Self {
            entity_id,
            guard: RequestGuard::new(view),
            state: LoadState::Idle,
        }
    }

    pub fn id(&self) -> ViewId {
        self.guard.view()
    }

    pub fn entity_id(&self) -> u32 {
        self.entity_id
    }

    pub fn begin_load(&mut self) -> RequestToken {
        self.state = LoadState::Loading;
        self.guard.issue()
    }

    pub fn retry(&mut self) -> Option<RequestToken> {
        match self.state {
            LoadState::Failed(_) => Some(self.begin_load()),
            _ => None,
        }
    }

    /// Apply a fetch outcome. Returns `false` if the token was superseded.
    pub fn complete(&mut self, token: RequestToken, result: Result<D, FetchFailed>) -> bool {
        if !self.guard.accepts(&token) {
            warn!(view = %token.view, generation = token.generation, "Discarding stale detail");
            return false;
        }
        match &result {
            Ok(_) => info!(view = %token.view, id = self.entity_id, "Detail ready"),
            Err(e) => warn!(view = %token.view, id = self.entity_id, error = %e, "Detail failed"),
        }
        self.state.settle(result);
        true
    }

    pub fn status(&self) -> ViewStatus {
        self.state.status()
    }

    pub fn data(&self) -> Option<&D> {
        self.state.ready()
    }

    pub fn error(&self) -> Option<&FetchFailed> {
        self.state.error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ResolveError;
    use crate::framework::mock::{character_json, location_json};
    use crate::model::Collection;

    #[test]
    fn test_location_detail_counts() {
        let location: Location =
            serde_json::from_value(location_json(1, "Earth (C-137)", &[1, 2, 3])).unwrap();
        let rick: Character = serde_json::from_value(character_json(1, "Rick Sanchez", "Alive")).unwrap();
        let detail = LocationDetail {
            location,
            residents: ResolvedPreview {
                total: 3,
                slots: vec![
                    Ok(rick.clone()),
                    Err(ResolveError::NotNavigable(String::new())),
                    Ok(rick),
                ],
            },
        };
        assert_eq!(detail.resident_count(), 3);
        assert_eq!(detail.residents.resolved_count(), 2);
        assert_eq!(detail.residents.unresolved_count(), 1);
    }

    #[test]
    fn test_stale_detail_discarded() {
        let mut view: CharacterDetailView = DetailView::new(ViewId(4), 1);
        let first = view.begin_load();
        view.complete(first, Err(FetchFailed::invalid_request(Collection::Character, "offline")));
        let second = view.retry().unwrap();

        let rick: Character = serde_json::from_value(character_json(1, "Rick Sanchez", "Alive")).unwrap();
        assert!(!view.complete(first, Ok(rick.clone())));
        assert_eq!(view.status(), ViewStatus::Loading);

        assert!(view.complete(second, Ok(rick)));
        assert_eq!(view.data().map(|c| c.id), Some(1));
    }
}
