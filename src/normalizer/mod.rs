pub mod timestamp;

use crate::app::Result;
use crate::domain::PageResult;

pub use timestamp::parse_timestamp;

/// Turns raw recommendations responses into typed pages.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Result<PageResult> {
        let page: PageResult = serde_json::from_slice(body)?;

        if page.returned_count as usize != page.items.len() {
            tracing::debug!(
                "Page at offset {} reports count {} but carries {} items",
                page.offset,
                page.returned_count,
                page.items.len()
            );
        }

        Ok(page)
    }
}
