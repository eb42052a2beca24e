// src/cli/args.rs
use crate::application::SortMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (default: ./biteboard.toml when present)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Path to the review storage file, overrides the config
    #[arg(short, long, value_name = "STORAGE", global = true)]
    pub storage: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Listing controls shared by `list` and `render`.
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct QueryArgs {
    /// Case-insensitive text to look for in restaurant, dish, neighborhood,
    /// comment and cuisine
    #[arg(long, value_name = "TERM", default_value = "")]
    pub search: String,

    /// Cuisine to show, or "all"
    #[arg(long, value_name = "CUISINE", default_value = "all")]
    pub cuisine: String,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortMode::RatingDesc)]
    pub sort: SortMode,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List reviews matching the search, cuisine and sort options
    List {
        #[command(flatten)]
        query: QueryArgs,

        /// Output reviews as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show total reviews, average rating and top cuisine
    Stats {
        /// Output statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a review; incomplete submissions are ignored
    Add {
        #[arg(long)]
        restaurant: Option<String>,

        #[arg(long)]
        dish: Option<String>,

        #[arg(long)]
        cuisine: Option<String>,

        #[arg(long)]
        neighborhood: Option<String>,

        /// Whole number from 1 to 5
        #[arg(long)]
        rating: Option<String>,

        #[arg(long)]
        comment: Option<String>,

        /// Defaults to "Anonymous"
        #[arg(long)]
        reviewer: Option<String>,
    },

    /// Render the review board as an HTML page
    Render {
        #[command(flatten)]
        query: QueryArgs,

        /// Write the page here instead of a temporary file
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Open the page in the browser
        #[arg(long)]
        open: bool,
    },

    /// Render the dish catalog as an HTML page
    Dishes {
        /// Dish JSON document (default from config)
        #[arg(value_name = "DATA")]
        data: Option<PathBuf>,

        /// Write the page here instead of a temporary file
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Open the page in the browser
        #[arg(long)]
        open: bool,
    },

    /// Convert raw images to WebP and create missing placeholders
    Images {
        /// Re-encode raw images even when both outputs exist
        #[arg(short, long)]
        force: bool,
    },

    /// Validate dish content documents
    Validate {
        /// Content directory (default from config)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}
