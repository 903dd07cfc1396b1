//! botcmd - console command bot.
//!
//! Reads commands from stdin and writes replies to stdout.

use botcmd::config::{self, Config};
use botcmd::console::{self, Console};
use botcmd::telemetry;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (optional path argument)
    let config_path = std::env::args().nth(1);
    let config = Config::load_or_default(config_path.as_deref())?;

    // Initialize tracing
    telemetry::init(&config.log);

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        return Err(anyhow::anyhow!(
            "Refusing to start with {} configuration error(s). See messages above.",
            errors.len()
        ));
    }

    let dispatcher = console::shared_dispatcher(&config)?;
    {
        let dispatcher = dispatcher.read();
        info!(
            path = config_path.as_deref().unwrap_or("<defaults>"),
            prefix = %dispatcher.prefix(),
            commands = dispatcher.snapshot().command_count(),
            "Starting botcmd"
        );
    }

    let user = std::env::var("USER").unwrap_or_else(|_| "console".to_string());
    Console::new(dispatcher, user)
        .run(tokio::io::stdin(), tokio::io::stdout())
        .await?;

    info!("Shutdown complete");
    Ok(())
}
