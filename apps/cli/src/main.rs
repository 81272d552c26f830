//! Overwatch patch tracker CLI.
//!
//! Fetches the official patch notes page, pulls out the most recent dated
//! patches, and prints a hero-by-hero balance summary.

mod commands;
mod render;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
