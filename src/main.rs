//! SciCalc Gateway
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌────────────┐    ┌──────────┐
//! │  Client  │───▶│ Gateway  │───▶│ Calculator │───▶│ Response │
//! │  (HTTP)  │    │(JWT auth)│    │   (pure)   │    │          │
//! └──────────┘    └──────────┘    └─────┬──────┘    └──────────┘
//!                                       │ tokio::spawn (never awaited)
//!                                       ▼
//!                                 ┌──────────┐
//!                                 │  oplog   │──▶ PostgreSQL
//!                                 └──────────┘
//! ```
//!
//! Usage: `scicalc_gateway [--env dev] [--port 8000]`

use scicalc_gateway::config::AppConfig;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = scicalc_gateway::logging::init_logging(&app_config);

    tracing::info!(
        "Starting SciCalc Gateway {} ({}) in {} mode",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env
    );

    let port = get_port_override().unwrap_or(app_config.gateway.port);
    if let Err(e) = scicalc_gateway::gateway::run_server(&app_config, port).await {
        tracing::error!("❌ FATAL: {:?}", e);
        return Err(e);
    }
    Ok(())
}
