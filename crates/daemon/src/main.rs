//! Birthday Reminder Engine - Main Entry Point
//!
//! Composition root: wires the SQLite contact store, the SMTP sender and the
//! run orchestration behind the JSON-RPC invocation surface. The daemon only
//! hosts the surface; cron (or an operator via the CLI) triggers each run.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Import workspace crates
use birthdays_api_rpc::{server::RpcServerConfig, RpcServer};
use birthdays_core::application::{ContactSelector, ReminderMailer, ReminderRunner};
use birthdays_core::port::SystemTimeProvider;
use birthdays_infra_mail::{SmtpConfig, SmtpMailSender};
use birthdays_infra_sqlite::{create_pool, run_migrations, SqliteActivityLog, SqliteContactStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_DB_PATH: &str = "~/.birthdays/contacts.db";
const DEFAULT_GROUP_NAME: &str = "birthday_greeting_recipients_group";

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let log_format = std::env::var("BIRTHDAYS_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Birthday Reminder Engine v{} starting...", VERSION);

    // 2. Load configuration
    let db_path = std::env::var("BIRTHDAYS_DB_PATH")
        .unwrap_or_else(|_| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

    let rpc_port: u16 = std::env::var("BIRTHDAYS_RPC_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9533);

    let group_name =
        std::env::var("BIRTHDAYS_GROUP_NAME").unwrap_or_else(|_| DEFAULT_GROUP_NAME.to_string());

    let smtp_config = SmtpConfig::from_env()
        .map_err(|e| anyhow::anyhow!("SMTP configuration failed: {}", e))?;

    info!(db_path = %db_path, "Initializing database...");

    // 3. Initialize database
    let pool = create_pool(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let contact_store = Arc::new(SqliteContactStore::new(pool.clone()));
    let activity_log = Arc::new(SqliteActivityLog::new(pool.clone(), time_provider.clone()));
    let mail_sender = Arc::new(
        SmtpMailSender::new(&smtp_config)
            .map_err(|e| anyhow::anyhow!("SMTP transport setup failed: {}", e))?,
    );

    let runner = Arc::new(ReminderRunner::new(
        ContactSelector::new(contact_store, group_name),
        ReminderMailer::new(mail_sender, activity_log),
        time_provider,
    ));

    // 5. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_config = RpcServerConfig {
        port: rpc_port,
        ..Default::default()
    };
    let rpc_handle = RpcServer::new(rpc_config, runner)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!("System ready. Waiting for reminder runs...");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    info!("Shutdown complete.");

    Ok(())
}
