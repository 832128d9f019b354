use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use corkboard::api::{self, AppState};
use corkboard::config::{self, AppConfig};
use corkboard::db::Database;

fn main() {
    if let Err(err) = try_main() {
        let _ = writeln!(io::stderr(), "{err:?}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .common
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let config = AppConfig::load(&config_path)?;

    init_logging(&cli.common, &config)?;

    match cli.command.unwrap_or(Command::Serve(ServeCommand::default())) {
        Command::Serve(cmd) => async_serve(config, cmd),
        Command::Init(cmd) => handle_init(&config_path, cmd),
    }
}

#[tokio::main]
async fn async_serve(config: AppConfig, cmd: ServeCommand) -> Result<()> {
    handle_serve(config, cmd).await
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Corkboard - a small message-board server.",
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    common: CommonOpts,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Args)]
struct CommonOpts {
    /// Override the config file path
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Reduce output to only errors
    #[arg(short, long, action = clap::ArgAction::SetTrue, global = true)]
    quiet: bool,
    /// Increase logging verbosity (stackable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the web server (the default)
    Serve(ServeCommand),
    /// Write a default config file
    Init(InitCommand),
}

#[derive(Debug, Clone, Default, Args)]
struct ServeCommand {
    /// Override the bind address
    #[arg(long)]
    host: Option<String>,
    /// Override the port
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Debug, Clone, Args)]
struct InitCommand {
    /// Overwrite an existing config file
    #[arg(long)]
    force: bool,
}

fn init_logging(common: &CommonOpts, config: &AppConfig) -> Result<()> {
    let level = if common.quiet {
        "error"
    } else {
        match common.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Ok(())
}

async fn handle_serve(mut config: AppConfig, cmd: ServeCommand) -> Result<()> {
    if let Some(host) = cmd.host {
        config.server.host = host;
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }

    let db = Database::new(&config.database.path).await?;
    let state = AppState::new(&db, config.board.clone());
    let router = api::create_router(state, &config.server.static_dir);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;
    info!(%addr, "corkboard listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

fn handle_init(config_path: &Path, cmd: InitCommand) -> Result<()> {
    if config_path.exists() && !cmd.force {
        anyhow::bail!(
            "config file {} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    AppConfig::write_default(config_path)?;
    println!("wrote {}", config_path.display());
    Ok(())
}
