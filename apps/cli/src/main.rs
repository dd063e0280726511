//! tooldb CLI: build a developer-tool database from GitHub.
//!
//! Two pipelines write the same JSON artifact: `tooldb search` runs fixed
//! repository searches, `tooldb lists` scrapes curated awesome lists.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
