use std::ops::Range;

use serde::Deserialize;

use crate::domain::{PageResult, VideoItem};

/// Items requested per page.
pub const PAGE_SIZE: u32 = 10;
/// A fetch starts once the visible index is this close to the end of the list.
pub const PREFETCH_THRESHOLD: usize = 2;
/// Most items kept in memory once the window is trimmed.
pub const MAX_CACHE_SIZE: usize = 5;

/// Tunables for paging and eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedLimits {
    pub page_size: u32,
    pub prefetch_threshold: usize,
    pub max_cache_size: usize,
}

impl Default for FeedLimits {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            prefetch_threshold: PREFETCH_THRESHOLD,
            max_cache_size: MAX_CACHE_SIZE,
        }
    }
}

impl FeedLimits {
    /// A zero page size would read as an exhausted feed on the first fetch,
    /// and a zero cache would empty the list on every trim.
    pub fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 {
            return Err("page_size must be at least 1".to_string());
        }
        if self.max_cache_size == 0 {
            return Err("max_cache_size must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Coarse lifecycle of the feed. `last_error` is tracked separately and can
/// accompany any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    Idle,
    Loading,
    Populated,
    Exhausted,
}

/// The feed window and pagination cursor.
///
/// Only the feed controller mutates this; everyone else sees a
/// [`FeedSnapshot`].
#[derive(Debug, Clone)]
pub struct FeedState {
    limits: FeedLimits,
    items: Vec<VideoItem>,
    next_offset: u32,
    is_loading: bool,
    has_more: bool,
    has_loaded: bool,
    last_error: Option<String>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(FeedLimits::default())
    }
}

impl FeedState {
    pub fn new(limits: FeedLimits) -> Self {
        Self {
            limits,
            items: Vec::new(),
            next_offset: 0,
            is_loading: false,
            has_more: true,
            has_loaded: false,
            last_error: None,
        }
    }

    pub fn limits(&self) -> FeedLimits {
        self.limits
    }

    pub fn items(&self) -> &[VideoItem] {
        &self.items
    }

    pub fn next_offset(&self) -> u32 {
        self.next_offset
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn phase(&self) -> FeedPhase {
        if self.is_loading {
            FeedPhase::Loading
        } else if !self.has_more {
            FeedPhase::Exhausted
        } else if self.has_loaded {
            FeedPhase::Populated
        } else {
            FeedPhase::Idle
        }
    }

    /// Back to an empty feed at offset 0. `is_loading` is left to the caller,
    /// which owns the in-flight fetch.
    pub(crate) fn reset(&mut self) {
        self.items.clear();
        self.next_offset = 0;
        self.has_more = true;
        self.has_loaded = false;
        self.last_error = None;
    }

    /// Whether reporting `index` as visible should start a fetch.
    pub fn should_prefetch(&self, index: usize) -> bool {
        if self.is_loading || !self.has_more {
            return false;
        }
        // index >= len - threshold, without going negative
        index + self.limits.prefetch_threshold >= self.items.len()
    }

    /// Mark a fetch as started and return the offset to request.
    pub(crate) fn begin_fetch(&mut self) -> u32 {
        self.is_loading = true;
        self.last_error = None;
        self.next_offset
    }

    pub(crate) fn apply_page(&mut self, page: PageResult) {
        self.has_loaded = true;
        if page.items.is_empty() {
            self.has_more = false;
            return;
        }

        let count = page.items.len() as u32;
        self.items.extend(page.items);
        self.next_offset += count;
    }

    /// Record a failed fetch. The cursor stays put so a retry asks for the
    /// same offset.
    pub(crate) fn apply_failure(&mut self, message: String) {
        self.has_loaded = true;
        self.last_error = Some(message);
    }

    pub(crate) fn finish_fetch(&mut self) {
        self.is_loading = false;
    }

    pub(crate) fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Trim the list to `max_cache_size` items starting one before `index`.
    ///
    /// Returns the kept range, in positions before the trim, if anything was
    /// dropped. Positions shift afterwards; `next_offset` does not.
    pub(crate) fn evict_around(&mut self, index: usize) -> Option<Range<usize>> {
        let len = self.items.len();
        if len <= self.limits.max_cache_size || index >= len {
            return None;
        }

        let start = index.saturating_sub(1);
        let end = len.min(start + self.limits.max_cache_size);
        if start == 0 && end == len {
            return None;
        }

        self.items.truncate(end);
        self.items.drain(..start);
        Some(start..end)
    }

    /// Find where a reported item sits now.
    ///
    /// `index` wins if it still holds `video_id`. Otherwise the closest copy
    /// of `video_id` is used, which covers a report made against a list that
    /// has since been trimmed.
    pub fn resolve_visible(&self, index: usize, video_id: i64) -> Option<usize> {
        if self.items.get(index).map(|item| item.id) == Some(video_id) {
            return Some(index);
        }
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.id == video_id)
            .map(|(position, _)| position)
            .min_by_key(|position| position.abs_diff(index))
    }

    pub fn snapshot(&self, generation: u64) -> FeedSnapshot {
        FeedSnapshot {
            items: self.items.clone(),
            next_offset: self.next_offset,
            is_loading: self.is_loading,
            has_more: self.has_more,
            last_error: self.last_error.clone(),
            phase: self.phase(),
            generation,
        }
    }
}

/// Read-only copy of the feed handed to presentation code.
///
/// Positions are only meaningful against the snapshot they came from; hold
/// on to video ids across updates and resolve them with [`position_of`].
///
/// [`position_of`]: FeedSnapshot::position_of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub items: Vec<VideoItem>,
    pub next_offset: u32,
    pub is_loading: bool,
    pub has_more: bool,
    pub last_error: Option<String>,
    pub phase: FeedPhase,
    pub generation: u64,
}

impl Default for FeedSnapshot {
    fn default() -> Self {
        FeedState::default().snapshot(0)
    }
}

impl FeedSnapshot {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position_of(&self, video_id: i64) -> Option<usize> {
        self.items.iter().position(|item| item.id == video_id)
    }

    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().map(|item| item.id).collect()
    }
}
