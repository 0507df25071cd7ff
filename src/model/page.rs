use serde::Deserialize;

/// Collection metadata returned alongside every page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
}

/// Wire shape of `GET /{collection}?page=N`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageEnvelope<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

/// One fetched page of a collection.
///
/// Created fresh for every page-number change and replaced wholesale; there is
/// no merging across pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub total_pages: u32,
    pub total_count: u32,
}

impl<T> Page<T> {
    /// Builds a page from the envelope for the requested `page_number`.
    ///
    /// `total_pages` is clamped to at least 1, and to at least `page_number`
    /// so that `page_number <= total_pages` always holds for a received page.
    pub fn from_envelope(page_number: u32, envelope: PageEnvelope<T>) -> Self {
        let page_number = page_number.max(1);
        Self {
            items: envelope.results,
            page_number,
            total_pages: envelope.info.pages.max(page_number),
            total_count: envelope.info.count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
