//! JSON-RPC Server
//!
//! Implements the JSON-RPC 2.0 server over TCP on localhost.

use crate::handler::RpcHandler;
use crate::types::SendRemindersRequest;
use birthdays_core::application::ReminderRunner;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::types::ErrorObjectOwned;
use jsonrpsee::RpcModule;
use std::sync::Arc;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9533;

/// RPC Server Configuration
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, runner: Arc<ReminderRunner>) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(runner)),
        }
    }

    /// Start the JSON-RPC server
    ///
    /// Security: Only binds to 127.0.0.1 (no external access); cron or the
    /// CLI invoke the methods locally.
    pub async fn start(self) -> Result<ServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server on TCP (localhost only)"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let mut module = RpcModule::new(());

        // Register methods
        let handler = self.handler.clone();
        module
            .register_async_method("birthdays.sendReminders.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: SendRemindersRequest = params.parse()?;
                    Ok::<_, ErrorObjectOwned>(handler.send_reminders(req).await)
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("birthdays.sendReminders.v3", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: SendRemindersRequest = params.parse()?;
                    Ok::<_, ErrorObjectOwned>(handler.send_reminders_legacy(req).await)
                }
            })
            .map_err(|e| e.to_string())?;

        info!("JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok(handle)
    }
}
