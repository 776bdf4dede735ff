mod app;
mod chat_cmd;
mod config_cmd;
mod personas_cmd;
mod status_cmd;
mod terminal_output;
mod tools_cmd;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use wayfarer_config::defaults::DEFAULT_LOG_LEVEL;
use wayfarer_config::{config_dir, config_file_path, load_and_prepare};
use wayfarer_gateway::{start_server, GatewayState};

#[derive(Parser)]
#[command(name = "wayfarer")]
#[command(about = "Wayfarer, a multi-persona travel planning assistant")]
#[command(version)]
struct Cli {
    /// Path to config.yaml (defaults to ~/.wayfarer/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Chat with the assistant in the terminal
    Chat,
    /// Run a mock data tool directly
    Tools {
        #[command(subcommand)]
        tool: tools_cmd::ToolCommand,
    },
    /// List personas, their models and hand-off targets
    Personas,
    /// Check the health of a running gateway
    Status,
    /// Print the effective configuration with secrets masked
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let logger = wayfarer_logging::init_logger(DEFAULT_LOG_LEVEL)?;

    let path = cli
        .config
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let mut config = load_and_prepare(&path).await?;
    logger.apply(config.log_level(), config.log_dir().map(Path::new))?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.get_or_insert_with(Default::default).port = Some(port);
            }
            let api_key = config.require_credential()?;
            let assistant = app::build_assistant(&config, api_key).await;
            let addr = config.listen_addr().parse()?;

            info!(%addr, config = %path.display(), "Starting Wayfarer gateway");
            let state = GatewayState::new(assistant.into(), wayfarer_tools::travel_tools());
            start_server(addr, state).await?;
        }
        Commands::Chat => {
            let api_key = config.require_credential()?;
            let assistant = app::build_assistant(&config, api_key).await;
            chat_cmd::run(&assistant).await?;
        }
        Commands::Tools { tool } => tools_cmd::run(tool),
        Commands::Personas => personas_cmd::run(&config),
        Commands::Status => status_cmd::run(&config).await?,
        Commands::Config => config_cmd::run(&config, &path)?,
    }

    Ok(())
}
