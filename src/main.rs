use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use farmabot::{Commands, ContainerConfig, Router, DEFAULT_MAX_OUTPUT_TOKENS};

#[derive(Parser)]
#[command(name = "farmabot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer with the offline mock language service
    #[arg(long, global = true, env = "FARMABOT_MOCK")]
    mock: bool,

    /// File holding the system persona (defaults to the built-in FarmaBot persona)
    #[arg(long, global = true, env = "FARMABOT_PERSONA_FILE")]
    persona_file: Option<PathBuf>,

    /// Upper bound on the size of each model reply
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_OUTPUT_TOKENS)]
    max_output_tokens: u32,

    /// Timeout in seconds for outbound HTTP calls
    #[arg(long, global = true, default_value = "60")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ContainerConfig {
        mock: cli.mock,
        persona_file: cli.persona_file,
        max_output_tokens: cli.max_output_tokens,
        timeout_secs: cli.timeout_secs,
    };

    let output = Router::new(config).route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
