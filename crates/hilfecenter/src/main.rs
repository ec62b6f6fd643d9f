mod cli;
mod commands;
mod config;
mod fetch;
mod load;
mod logging;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = if cli.verbose {
        true
    } else {
        logging::env_flag()
    };
    logging::init(verbose);
    match cli.command {
        Command::Load { content, json } => commands::load(&content, json),
        Command::Topics { category, content } => commands::topics(&category, &content),
        Command::Steps {
            category,
            topic,
            content,
            state,
        } => commands::steps(&category, &topic, &content, state),
        Command::Toggle {
            category,
            topic,
            index,
            content,
            state,
        } => commands::toggle(&category, &topic, index, &content, state),
        Command::Search { term, content } => commands::search(&term, &content),
        Command::Run { config } => commands::run_from_config(&config),
    }
}
