use serde::{Deserialize, Serialize};

use crate::domain::VideoItem;

/// One response of the recommendations endpoint.
///
/// `items` keeps the server's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    #[serde(rename = "total")]
    pub total_count: u64,
    pub offset: u32,
    pub limit: u32,
    #[serde(rename = "count")]
    pub returned_count: u32,
    pub items: Vec<VideoItem>,
}

impl PageResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
