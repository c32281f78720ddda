//! # reelfeed
//!
//! An infinite-scroll short video feed, driven from the terminal.
//!
//! ## Architecture
//!
//! ```text
//! Gateway → Normalizer → FeedController → snapshot → CLI / TUI
//! ```
//!
//! The controller keeps a small sliding window of videos around the one the
//! viewer is looking at. It fetches the next page shortly before the window
//! runs out and drops items that have scrolled far out of view.
//!
//! ## Quick Start
//!
//! ```bash
//! # One page of recommendations
//! reelfeed page --offset 0 --limit 10
//!
//! # Where a video streams from
//! reelfeed stream-url 903
//!
//! # Scroll headlessly and watch the window move
//! reelfeed scroll --steps 15
//!
//! # Launch TUI
//! reelfeed tui
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires configuration, endpoint
/// and gateway together.
pub mod app;

/// Command-line interface using clap.
///
/// - `page` - Fetch one page of recommendations
/// - `stream-url <id>` - Print a video's HLS playlist URL
/// - `scroll` - Drive the feed controller headlessly
/// - `tui` - Launch the TUI
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/reelfeed/config.toml`, supporting:
/// - API base URL, category and timeouts
/// - Feed window sizes
/// - Custom colors (named or hex)
/// - Custom keybindings
pub mod config;

/// Core domain models.
///
/// - [`VideoItem`](domain::VideoItem): One short video
/// - [`PageResult`](domain::PageResult): One page of recommendations
/// - [`FeedState`](domain::FeedState): The pure sliding-window state
pub mod domain;

/// The feed controller task and its handle.
pub mod feed;

/// Access to the remote video catalogue.
///
/// - [`Gateway`](gateway::Gateway): Async trait for fetching pages
/// - [`HttpGateway`](gateway::HttpGateway): reqwest-based implementation
/// - [`ApiEndpoint`](gateway::ApiEndpoint): URL construction
pub mod gateway;

/// Response decoding and publication date parsing.
pub mod normalizer;

/// Terminal user interface.
///
/// Window list, details pane and a status bar. Keybindings: j/k move,
/// o opens the stream, R resets the feed, x dismisses errors, q quits.
pub mod tui;
