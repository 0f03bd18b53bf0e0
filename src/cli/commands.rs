use clap::{Parser, Subcommand, ValueEnum};

use crate::sources::SourceMode;

#[derive(Parser)]
#[command(name = "wikiswipe")]
#[command(about = "Swipe through Wikipedia articles one card at a time")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Random,
    Trending,
    Mixed,
}

impl From<SourceArg> for SourceMode {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Random => SourceMode::Random,
            SourceArg::Trending => SourceMode::Trending,
            SourceArg::Mixed => SourceMode::Mixed,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the feed interactively (j/k to move, l to like, r to retry, q to quit)
    Browse {
        /// Where articles come from
        #[arg(short, long, value_enum, default_value_t = SourceArg::Mixed)]
        source: SourceArg,

        /// Ignore the cached feed and start from a fresh page
        #[arg(long)]
        fresh: bool,
    },

    /// List liked articles
    Liked,

    /// Forget the cached feed
    ClearCache,
}
