//! Paging envelope shared by list endpoints.

use serde::{Deserialize, Serialize};

/// One page of a server-side list.
///
/// `total` is authoritative; `items` may be shorter than `page_size` only on
/// the final page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    /// The person registry omits this field; callers backfill it.
    #[serde(default)]
    pub page_size: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn empty(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size,
        }
    }

    /// Number of pages implied by `total` and `page_size`.
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }

    pub fn is_last_page(&self) -> bool {
        u64::from(self.page) >= self.page_count()
    }

    /// Replaces a missing `page_size` with the size the request asked for.
    pub fn with_page_size_fallback(mut self, requested: u32) -> Self {
        if self.page_size == 0 {
            self.page_size = requested;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn decodes_envelope_without_page_size() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"items":[1,2,3],"page":2,"total":13}"#).unwrap();
        let page = page.with_page_size_fallback(10);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.page_count(), 2);
        assert!(page.is_last_page());
    }

    #[test]
    fn empty_page_has_no_pages() {
        let page: Page<u32> = Page::empty(20);
        assert_eq!(page.page_count(), 0);
        assert!(page.items.is_empty());
    }
}
