//! Prism CLI
//!
//! Command-line interface for the Prism intent router and ambient services.

use clap::Parser;
use env_logger::Env;
use log::info;
use tracing_subscriber::EnvFilter;

use prism::cli::{commands, Cli, Commands, EchoCommands};
use prism::PrismConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    } else {
        env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    }

    info!("Prism v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd).await,
        None => {
            println!("Prism v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

async fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    let config = PrismConfig::from_env();

    match cmd {
        Commands::Classify { text, json } => commands::classify(&config, &text, json).await?,
        Commands::Preset { mode } => commands::show_preset(&mode)?,
        Commands::Whisper { mode, mood, count } => {
            commands::whisper(&config, &mode, mood.as_deref(), count).await?
        }
        Commands::Speak { text, voice, out } => {
            commands::speak(&config, &text, &voice, &out).await?
        }
        Commands::Voices => commands::voices(&config).await?,
        Commands::Echo(EchoCommands::Post {
            name,
            message,
            mode,
        }) => commands::echo_post(&config, &name, &message, &mode)?,
        Commands::Echo(EchoCommands::List { limit }) => commands::echo_list(&config, limit)?,
        Commands::RenderAmbient { mode, out, seconds } => {
            commands::render_ambient(&mode, &out, seconds)?
        }
    }

    Ok(())
}
