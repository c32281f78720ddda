pub mod page;
pub mod state;
pub mod video;

pub use page::PageResult;
pub use state::{
    FeedLimits, FeedPhase, FeedSnapshot, FeedState, MAX_CACHE_SIZE, PAGE_SIZE,
    PREFETCH_THRESHOLD,
};
pub use video::VideoItem;
