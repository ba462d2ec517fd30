//! src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod email;
mod errors;
mod llm;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();
    log::debug!(
        "deepmail {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("DEEPMAIL_BUILD_TARGET")
    );

    commands::generate::handle_generate(cli).await
}
