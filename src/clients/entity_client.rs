use crate::framework::{FetchFailed, FetchFailure, Transport};
use crate::model::{ApiEntity, Collection, Page, PageEnvelope};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// A type-safe client for reading entities from the remote API.
///
/// Generic over the [`Transport`], and over the entity type per call: the entity's
/// [`ApiEntity::COLLECTION`] decides which endpoint is hit and how failures are labelled.
///
/// * **Cloneable** – holds an `Arc` to the transport, so cloning is inexpensive.
/// * **Stateless** – no caching; every call goes to the transport exactly once.
pub struct EntityClient<T: Transport> {
    transport: Arc<T>,
    base_url: Url,
}

impl<T: Transport> Clone for EntityClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

impl<T: Transport> EntityClient<T> {
    /// `base_url` must end in `/` (see [`ExplorerConfig`](crate::lifecycle::ExplorerConfig)).
    pub fn new(transport: T, base_url: Url) -> Self {
        Self {
            transport: Arc::new(transport),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch one page of `E`'s collection. `page_number` starts at 1.
    #[instrument(skip(self), fields(collection = %E::COLLECTION))]
    pub async fn fetch_page<E: ApiEntity>(&self, page_number: u32) -> Result<Page<E>, FetchFailed> {
        if page_number < 1 {
            return Err(FetchFailed::invalid_request(
                E::COLLECTION,
                format!("page number must be >= 1, got {page_number}"),
            ));
        }
        let mut url = self.collection_url(E::COLLECTION, None)?;
        url.query_pairs_mut()
            .append_pair("page", &page_number.to_string());

        let envelope: PageEnvelope<E> = self.get_decoded(E::COLLECTION, &url).await?;
        let page = Page::from_envelope(page_number, envelope);
        info!(
            page = page.page_number,
            total_pages = page.total_pages,
            items = page.items.len(),
            "Fetched page"
        );
        Ok(page)
    }

    /// Fetch a single `E` by id. Ids start at 1.
    #[instrument(skip(self), fields(collection = %E::COLLECTION))]
    pub async fn fetch_by_id<E: ApiEntity>(&self, id: u32) -> Result<E, FetchFailed> {
        if id < 1 {
            return Err(FetchFailed::invalid_request(
                E::COLLECTION,
                format!("id must be >= 1, got {id}"),
            ));
        }
        let url = self.collection_url(E::COLLECTION, Some(id))?;
        self.get_decoded(E::COLLECTION, &url).await
    }

    /// Fetch an `E` from a URL embedded in another entity, verbatim.
    #[instrument(skip(self), fields(collection = %E::COLLECTION))]
    pub async fn fetch_by_url<E: ApiEntity>(&self, url: &str) -> Result<E, FetchFailed> {
        let url = Url::parse(url)
            .map_err(|e| FetchFailed::invalid_request(E::COLLECTION, format!("{url}: {e}")))?;
        self.get_decoded(E::COLLECTION, &url).await
    }

    fn collection_url(&self, collection: Collection, id: Option<u32>) -> Result<Url, FetchFailed> {
        let path = match id {
            Some(id) => format!("{}/{}", collection.path(), id),
            None => collection.path().to_string(),
        };
        self.base_url
            .join(&path)
            .map_err(|e| FetchFailed::invalid_request(collection, e.to_string()))
    }

    async fn get_decoded<D: DeserializeOwned>(
        &self,
        collection: Collection,
        url: &Url,
    ) -> Result<D, FetchFailed> {
        debug!(%url, "Sending request");
        let body: Value = self.transport.get(url).await.map_err(|e| {
            warn!(%url, error = %e, "Fetch failed");
            FetchFailed::new(collection, e)
        })?;
        serde_json::from_value(body).map_err(|e| {
            warn!(%url, error = %e, "Malformed payload");
            FetchFailed::new(collection, FetchFailure::Malformed(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{character_json, location_json, page_json, MockTransport, MOCK_BASE};
    use crate::framework::TransportError;
    use crate::model::{Character, Location, StatusKind};
    use serde_json::json;

    fn client(mock: &MockTransport) -> EntityClient<MockTransport> {
        EntityClient::new(mock.clone(), Url::parse(MOCK_BASE).unwrap())
    }

    #[tokio::test]
    async fn test_fetch_page_builds_query_and_decodes() {
        let mock = MockTransport::new();
        mock.expect_get(format!("{MOCK_BASE}character?page=2")).return_ok(page_json(
            vec![character_json(21, "Aqua Morty", "unknown"), character_json(22, "Aqua Rick", "unknown")],
            826,
            42,
        ));

        let page: Page<Character> = client(&mock).fetch_page(2).await.unwrap();
        assert_eq!(page.page_number, 2);
        assert_eq!(page.total_pages, 42);
        assert_eq!(page.total_count, 826);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].status.kind(), StatusKind::Unknown);

        mock.verify();
    }

    #[tokio::test]
    async fn test_page_zero_rejected_without_request() {
        let mock = MockTransport::new();
        let err = client(&mock).fetch_page::<Location>(0).await.unwrap_err();
        assert_eq!(err.collection, Collection::Location);
        assert!(matches!(err.reason, FetchFailure::InvalidRequest(_)));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_fetch_by_id_is_not_cached() {
        let mock = MockTransport::new();
        let url = format!("{MOCK_BASE}location/3");
        mock.expect_get(url.clone()).return_ok(location_json(3, "Citadel of Ricks", &[]));
        mock.expect_get(url.clone()).return_ok(location_json(3, "Citadel of Ricks", &[]));

        let client = client(&mock);
        let first: Location = client.fetch_by_id(3).await.unwrap();
        let second: Location = client.fetch_by_id(3).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(mock.request_count(&url), 2);
    }

    #[tokio::test]
    async fn test_http_and_payload_failures_are_fetch_failed() {
        let mock = MockTransport::new();
        mock.expect_get(format!("{MOCK_BASE}character/999"))
            .return_err(TransportError::Status(404));
        mock.expect_get(format!("{MOCK_BASE}character/1"))
            .return_ok(json!({ "id": "not-a-number" }));

        let client = client(&mock);
        let err = client.fetch_by_id::<Character>(999).await.unwrap_err();
        assert_eq!(err.reason, FetchFailure::Transport(TransportError::Status(404)));
        assert_eq!(err.user_message(), "Failed to fetch characters.");

        let err = client.fetch_by_id::<Character>(1).await.unwrap_err();
        assert!(matches!(err.reason, FetchFailure::Malformed(_)));
    }

    #[tokio::test]
    async fn test_fetch_by_url_rejects_garbage() {
        let mock = MockTransport::new();
        let err = client(&mock)
            .fetch_by_url::<Character>("not a url")
            .await
            .unwrap_err();
        assert!(matches!(err.reason, FetchFailure::InvalidRequest(_)));
    }
}
