//! The feed controller.
//!
//! A single task owns the [`FeedState`](crate::domain::FeedState). Callers
//! talk to it through a cloneable [`FeedHandle`] and read the result from
//! published [`FeedSnapshot`](crate::domain::FeedSnapshot)s.
//!
//! ```text
//! presentation ──notify_visible(i)──▶ controller ──fetch──▶ Gateway
//!      ▲                                   │
//!      └──────────── snapshot ◀────────────┘
//! ```

mod controller;

pub use controller::{spawn_feed_controller, FeedCommand, FeedController, FeedHandle};
