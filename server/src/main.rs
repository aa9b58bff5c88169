use clap::{Parser, Subcommand};
use eyre::{eyre, Result, WrapErr};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    prelude::*,
};

use base::setting::{generate_default, load, Settings, SETTINGS};
use base::{database::open_database, CLI_NAME};
use catalog::api;

#[derive(Parser)]
#[command(name = CLI_NAME, author, version, about, long_about = None)]
#[command(next_line_help = true)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short, long, value_name = "ADDRESS", default_value_t = String::from("127.0.0.1:4000"))]
    listen_address: String,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Prints the default configuration
    DefaultConfig,
    /// Applies the pending database migrations and exits
    Migrate,
    Serve,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Could not listen for the shutdown signal");
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    color_eyre::install()?;
    let tracing_builder = tracing_subscriber::registry().with(fmt::layer());
    if std::env::var(base::CATALOG_LOGLEVEL).is_ok() {
        tracing_builder.with(EnvFilter::from_env(base::CATALOG_LOGLEVEL))
    } else {
        tracing_builder.with(EnvFilter::default().add_directive(LevelFilter::INFO.into()))
    }
    .init();

    let Cli {
        config,
        listen_address,
        command,
    } = Cli::parse();
    match command.unwrap_or(Command::Serve) {
        Command::DefaultConfig => {
            let default = generate_default(Settings::default())?;
            println!("{}", base::setting::to_string(&default)?);
            Ok(())
        }
        Command::Migrate => {
            SETTINGS.get_or_try_init(async { load(config) }).await?;
            let db = open_database().await?;
            migration::Migrator::up(&db, None).await?;
            tracing::info!("Database migrated");
            Ok(())
        }
        Command::Serve => {
            // settings
            SETTINGS.get_or_try_init(async { load(config) }).await?;

            // database
            let db = open_database().await?;
            migration::Migrator::up(&db, None).await?;

            let addr: SocketAddr = listen_address
                .parse()
                .wrap_err(eyre!("Invalid listen address"))?;
            tracing::info! {%addr, "Listening"};
            axum::Server::bind(&addr)
                .serve(api::router(db).into_make_service())
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            Ok(())
        }
    }
}
