use clap::{Parser, Subcommand};
use ratingforge::ItemType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ratingforge")]
#[command(author, version, about = "Fetch normalized media ratings from rating providers")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rate a single item with every enabled provider
    Rate {
        /// Title to search for
        #[arg(short, long)]
        title: String,

        /// Release year (omit if unknown)
        #[arg(short, long, default_value = "0")]
        year: i32,

        /// Item type: movie or show
        #[arg(long = "type", default_value = "movie")]
        item_type: ItemType,

        /// Identifier used in log lines
        #[arg(long, default_value = "cli")]
        id: String,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
