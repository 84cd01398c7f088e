use serde::{Deserialize, Serialize};

/// Uniform list envelope returned by every collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,

    /// Total number of matching items across all pages.
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Page<T> {
    /// Number of pages needed to show `total` items at `limit` per page; never zero.
    #[must_use]
    pub fn page_count(&self, limit: u32) -> u64 {
        if limit == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(limit)).max(1)
    }
}
