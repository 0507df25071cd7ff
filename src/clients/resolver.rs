use crate::clients::EntityClient;
use crate::framework::{FetchFailed, Transport};
use crate::model::{ApiEntity, Reference};
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Default number of references resolved for a preview list.
pub const DEFAULT_PREVIEW: usize = 6;

/// Failure to dereference a single [`Reference`].
///
/// Recovered locally: the slot is marked unresolved and the batch carries on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    /// The reference has no URL to follow.
    #[error("Reference '{0}' has no resolvable URL")]
    NotNavigable(String),

    /// Following the URL failed.
    #[error(transparent)]
    Fetch(#[from] FetchFailed),
}

/// Dereferences embedded references into full entities, concurrently.
pub struct ReferenceResolver<T: Transport> {
    client: EntityClient<T>,
}

impl<T: Transport> Clone for ReferenceResolver<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Transport> ReferenceResolver<T> {
    pub fn new(client: EntityClient<T>) -> Self {
        Self { client }
    }

    /// Resolve every reference. Results keep the input order.
    ///
    /// All member fetches run concurrently and are joined before returning; a
    /// failing member never fails the batch.
    #[instrument(skip(self, references), fields(count = references.len()))]
    pub async fn resolve_all<E: ApiEntity>(
        &self,
        references: &[Reference],
    ) -> Vec<Result<E, ResolveError>> {
        let results = join_all(references.iter().map(|r| self.resolve_one(r))).await;
        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!(failed, "Some references could not be resolved");
        } else {
            debug!("All references resolved");
        }
        results
    }

    /// Resolve only the first `limit` references; the rest are counted, not fetched.
    #[instrument(skip(self, references), fields(total = references.len()))]
    pub async fn resolve_preview<E: ApiEntity>(
        &self,
        references: &[Reference],
        limit: usize,
    ) -> ResolvedPreview<E> {
        let head = &references[..references.len().min(limit)];
        let slots = self.resolve_all(head).await;
        let preview = ResolvedPreview {
            total: references.len(),
            slots,
        };
        info!(
            resolved = preview.resolved_count(),
            unresolved = preview.unresolved_count(),
            remaining = preview.remaining(),
            "Preview resolved"
        );
        preview
    }

    async fn resolve_one<E: ApiEntity>(&self, reference: &Reference) -> Result<E, ResolveError> {
        let url = reference
            .source_url
            .as_deref()
            .ok_or_else(|| ResolveError::NotNavigable(reference.display_name.clone()))?;
        Ok(self.client.fetch_by_url(url).await?)
    }
}

/// The outcome of resolving a bounded prefix of a reference list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPreview<E> {
    /// How many references the owner reported. Unaffected by failures.
    pub total: usize,
    /// One slot per attempted reference, in reference order.
    pub slots: Vec<Result<E, ResolveError>>,
}

impl<E> ResolvedPreview<E> {
    /// Successfully resolved entities, for rendering.
    pub fn resolved(&self) -> impl Iterator<Item = &E> {
        self.slots.iter().filter_map(|s| s.as_ref().ok())
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved().count()
    }

    pub fn unresolved_count(&self) -> usize {
        self.slots.len() - self.resolved_count()
    }

    /// References beyond the preview, reported as "+N more".
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.slots.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{character_json, MockTransport, MOCK_BASE};
    use crate::framework::TransportError;
    use crate::model::Character;
    use url::Url;

    fn resolver(mock: &MockTransport) -> ReferenceResolver<MockTransport> {
        ReferenceResolver::new(EntityClient::new(mock.clone(), Url::parse(MOCK_BASE).unwrap()))
    }

    fn refs(ids: &[u32]) -> Vec<Reference> {
        ids.iter()
            .map(|id| Reference::to_url(format!("{MOCK_BASE}character/{id}")))
            .collect()
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_order_and_total() {
        let mock = MockTransport::new();
        mock.expect_get(format!("{MOCK_BASE}character/1"))
            .return_ok(character_json(1, "Rick Sanchez", "Alive"));
        mock.expect_get(format!("{MOCK_BASE}character/2"))
            .return_err(TransportError::Status(500));
        mock.expect_get(format!("{MOCK_BASE}character/3"))
            .return_ok(character_json(3, "Summer Smith", "Alive"));

        let preview = resolver(&mock)
            .resolve_preview::<Character>(&refs(&[1, 2, 3]), DEFAULT_PREVIEW)
            .await;

        assert_eq!(preview.slots.len(), 3);
        assert!(preview.slots[0].is_ok());
        assert!(matches!(preview.slots[1], Err(ResolveError::Fetch(_))));
        assert!(preview.slots[2].is_ok());
        assert_eq!(preview.total, 3);
        assert_eq!(preview.resolved_count(), 2);
        assert_eq!(preview.unresolved_count(), 1);
        let names: Vec<_> = preview.resolved().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Rick Sanchez", "Summer Smith"]);

        mock.verify();
    }

    #[tokio::test]
    async fn test_references_beyond_limit_are_not_fetched() {
        let mock = MockTransport::new();
        for id in 1..=2 {
            mock.expect_get(format!("{MOCK_BASE}character/{id}"))
                .return_ok(character_json(id, "Morty Smith", "Alive"));
        }

        let preview = resolver(&mock)
            .resolve_preview::<Character>(&refs(&[1, 2, 3, 4, 5]), 2)
            .await;

        assert_eq!(preview.total, 5);
        assert_eq!(preview.resolved_count(), 2);
        assert_eq!(preview.remaining(), 3);
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_reference_without_url_is_not_navigable() {
        let mock = MockTransport::new();
        let results = resolver(&mock)
            .resolve_all::<Character>(&[Reference::new("unknown", None)])
            .await;
        assert_eq!(
            results,
            vec![Err(ResolveError::NotNavigable("unknown".into()))]
        );
        assert!(mock.requests().is_empty());
    }
}
