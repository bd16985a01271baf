//! DocBook entry point
//!
//! Run with:
//! ```bash
//! cargo run -p docbook-app
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use docbook_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(e) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {e}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(&TracingConfig::from_app_config(&config)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        data_dir = %config.storage.data_dir.display(),
        "Starting DocBook..."
    );

    if let Err(e) = docbook_app::run(config).await {
        error!(error = %e, code = e.error_code(), "DocBook failed");
        std::process::exit(1);
    }
}
