mod commands;
mod config;
mod logging;

use clap::Parser;
use config::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let cli = Cli::parse();
    let session = commands::login(&cli.account).await?;

    match cli.command {
        Command::Devices { json } => commands::devices(&session, json).await,
        Command::Info { device } => commands::info(&session, &device).await,
    }
}
