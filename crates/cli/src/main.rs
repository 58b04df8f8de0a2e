//! Birthdays CLI - Command-line interface for the birthday reminder engine
//!
//! The cron surface: a scheduler invokes `birthdays send-reminders` on its
//! cycle; the daemon executes the run and returns the report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9533";

#[derive(Parser)]
#[command(name = "birthdays")]
#[command(about = "Birthday Reminder Engine CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "BIRTHDAYS_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one reminder batch
    SendReminders {
        /// Redirect all mails to this address (caps selection at 10 contacts)
        #[arg(long, default_value = "")]
        debug_email: String,

        /// Suppress writing reminder activities to contacts
        #[arg(long)]
        disable_activities: bool,

        /// Relative-date rule, e.g. "+1 DAY" or "-2 WEEK" (default: today)
        #[arg(long, default_value = "")]
        date_filter: String,

        /// Call the legacy v3 wrapper instead of the v1 method
        #[arg(long)]
        legacy: bool,
    },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct RunCounts {
    total_candidates: usize,
    successful_sends: usize,
    failed_sends: usize,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn print_report(result: &serde_json::Value) -> Result<()> {
    if let Some(errors) = result.get("errors").and_then(|v| v.as_array()) {
        for error in errors {
            println!(
                "{} {}",
                "!".yellow().bold(),
                error.as_str().unwrap_or_default().yellow()
            );
        }
    }

    let status = result
        .get("status")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    println!("{}", status.green().bold());
    println!();

    let counts: RunCounts = serde_json::from_value(result.clone())?;
    let table = Table::new(vec![counts]).to_string();
    println!("{}", table);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::SendReminders {
            debug_email,
            disable_activities,
            date_filter,
            legacy,
        } => {
            let params = json!({
                "debug_email": debug_email,
                "disable_activities": disable_activities,
                "date_filter": date_filter,
            });

            if legacy {
                let result =
                    call_rpc(&cli.rpc_url, "birthdays.sendReminders.v3", params).await?;

                if result.get("is_error").and_then(|v| v.as_u64()) == Some(1) {
                    let message = result
                        .get("error_message")
                        .and_then(|v| v.as_str())
                        .unwrap_or("unknown error");
                    println!("{} {}", "✗".red().bold(), message.red());
                } else if let Some(values) = result.get("values") {
                    print_report(values)?;
                }
            } else {
                let result =
                    call_rpc(&cli.rpc_url, "birthdays.sendReminders.v1", params).await?;
                print_report(&result)?;
            }
        }
    }

    Ok(())
}
