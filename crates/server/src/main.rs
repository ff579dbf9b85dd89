//! pgprime server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use pgprime_core::config::AppConfig;
use pgprime_core::{EnvSecretSource, SecretSource};
use pgprime_server::{AppState, create_router, run_bootstrap};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// pgprime - readies a PostgreSQL cluster for vector embeddings
#[derive(Parser, Debug)]
#[command(name = "pgprimed")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "PGPRIME_CONFIG",
        default_value = "config/pgprime.toml"
    )]
    config: String,

    /// Run the bootstrap once and exit instead of serving HTTP
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("pgprime v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override
    // everything; the DB_* credential variables are read separately per
    // invocation)
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    if config_path.exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("PGPRIME_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    if args.once {
        return run_once(&config).await;
    }

    let state = AppState::new(config.clone());
    let app = create_router(state);

    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// One-shot invocation: run the bootstrap immediately and exit 0/1 by
/// outcome. This is the "run now" entry point for lifecycle hooks and
/// schedulers.
async fn run_once(config: &AppConfig) -> Result<()> {
    let password_source: Option<Box<dyn SecretSource>> = config
        .bootstrap
        .password_secret_env
        .as_ref()
        .map(|var| Box::new(EnvSecretSource::new(var.clone())) as Box<dyn SecretSource>);

    let outcome = run_bootstrap(
        |name| std::env::var(name).ok(),
        &config.bootstrap.extension,
        password_source.as_deref(),
    )
    .await;

    println!("{}", outcome.body);
    if outcome.status == 200 {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
