use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hilfecenter", about = "Truck-center help desk CLI")]
pub struct Cli {
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load base and sheet content and print the merged category overview.
    Load {
        #[command(flatten)]
        content: ContentArgs,
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// List the topics of one category.
    Topics {
        category: String,
        #[command(flatten)]
        content: ContentArgs,
    },
    /// Show the steps of one topic with completion markers.
    Steps {
        category: String,
        topic: String,
        #[command(flatten)]
        content: ContentArgs,
        #[arg(long)]
        state: Option<PathBuf>,
    },
    /// Toggle one step between done and not done.
    Toggle {
        category: String,
        topic: String,
        index: usize,
        #[command(flatten)]
        content: ContentArgs,
        #[arg(long)]
        state: Option<PathBuf>,
    },
    /// Search categories, topics and steps.
    Search {
        term: String,
        #[command(flatten)]
        content: ContentArgs,
    },
    /// Load everything from a YAML config and print a summary.
    Run {
        #[arg(long, default_value = "hilfecenter.yaml")]
        config: String,
    },
}

#[derive(Args, Debug)]
pub struct ContentArgs {
    /// Base content document, local path or http(s) URL.
    #[arg(long, default_value = "data/hilfecenter.json")]
    pub base: String,
    /// Supplemental sheet CSV, local path or http(s) URL.
    #[arg(long)]
    pub sheet: Option<String>,
}
