use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Offline inspector for recorded Sui JSON-RPC responses.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode one execution response and summarize its effects.
    ///
    /// Accepts bare effects, a transaction lookup response, or an execute
    /// response, each optionally wrapped in a JSON-RPC envelope.
    Effects {
        /// Path to the recorded response.
        path: PathBuf,
    },

    /// Walk a recorded paginated listing and print every item in order.
    Walk {
        /// Listing type, which fixes the item and cursor shapes.
        #[arg(long, value_enum, env = "SIFT_KIND")]
        kind: ListingKind,

        /// JSON-encoded cursor to start from, e.g. '"0x2d1c"' or
        /// '{"txDigest":"...","eventSeq":1}'. Starts at the first page if omitted.
        #[arg(long)]
        cursor: Option<String>,

        /// Stop after this many items.
        #[arg(long, env = "SIFT_LIMIT")]
        limit: Option<usize>,

        /// Path to a JSON array of recorded pages (bare or in JSON-RPC envelopes).
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ListingKind {
    Coins,
    Transactions,
    Events,
}
