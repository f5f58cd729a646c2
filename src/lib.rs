pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config)?;

    match command {
        Commands::Serve => {
            let prometheus_handle = install_metrics_recorder(&config)?;
            run_server(config, prometheus_handle).await
        }

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("Created config.toml with default settings.");
            } else {
                println!("config.toml already exists; left untouched.");
            }
            Ok(())
        }

        Commands::CreateAdmin { username, password } => {
            cli::cmd_create_admin(&config, &username, password).await
        }

        Commands::Genres => cli::cmd_list_genres(&config).await,

        Commands::Movies { search, genre } => {
            cli::cmd_list_movies(&config, search.as_deref(), genre.as_deref()).await
        }
    }
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.general.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.context("Failed to initialize logging")
}

fn install_metrics_recorder(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.bind_address, config.server.port);

    let state = api::create_app_state_from_config(config, prometheus_handle).await?;
    let app = api::router(state).await;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web server running at http://{}", addr);

    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {}", e);
        }
    });

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    server.abort();
    info!("Server stopped");

    Ok(())
}
