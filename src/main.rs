use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use launchdeck::backend::rest::RestBackend;
use launchdeck::config::Config;
use launchdeck::logger::{self, Logger};
use launchdeck::ui;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--version" || arg == "-V") {
        println!("launchdeck {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.iter().any(|arg| arg == "--generate-config") {
        let path = Config::get_default_config_path()?;
        Config::generate_default_config(&path)?;
        return Ok(());
    }

    let config = Config::load().context("Failed to load configuration")?;

    if args.iter().any(|arg| arg == "--check-config") {
        println!("Configuration OK");
        println!("  server: {} (project '{}')", config.server.base_url, config.server.project);
        println!("  token env: {}", config.server.api_token_env);
        println!("  fallback filter: '{}'", config.filters.fallback);
        return Ok(());
    }

    let logger = Logger::new();
    logger::init(&config.logging, logger.clone())?;

    // Check if API token is set
    let token = match std::env::var(&config.server.api_token_env) {
        Ok(token) if !token.is_empty() => token,
        _ => {
            eprintln!("❌ Error: {} environment variable not set", config.server.api_token_env);
            eprintln!("\n💡 To use this app:");
            eprintln!("1. Generate an API token in your reporting server's profile page");
            eprintln!(
                "2. Set it as environment variable: export {}=your_token_here",
                config.server.api_token_env
            );
            eprintln!("3. Run the app again to see your launches!");
            return Ok(());
        }
    };

    let backend = RestBackend::new(
        &config.server.base_url,
        &config.server.project,
        &token,
        Duration::from_secs(config.server.request_timeout_seconds),
    )?;

    // Run the TUI application
    ui::run_app(Arc::new(backend), &config, logger).await?;

    Ok(())
}
