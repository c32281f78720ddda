pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::PAGE_SIZE;

#[derive(Parser)]
#[command(name = "reelfeed")]
#[command(about = "Infinite-scroll short video feed for the terminal", long_about = None)]
pub struct Cli {
    /// API base URL (overrides [api].base_url in the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Config file path (default: ~/.config/reelfeed/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a single page of recommendations
    Page {
        /// Number of items to skip
        #[arg(short, long, default_value_t = 0)]
        offset: u32,

        /// Page size
        #[arg(short, long, default_value_t = PAGE_SIZE)]
        limit: u32,

        /// Content category (default: [api].category)
        #[arg(long)]
        category: Option<String>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the stream URL for a video
    StreamUrl {
        /// Video id
        id: i64,
    },
    /// Scroll through the feed headlessly, printing the window at each step
    Scroll {
        /// Number of scroll steps
        #[arg(short, long, default_value_t = 20)]
        steps: usize,
    },
    /// Launch the TUI
    Tui,
}
