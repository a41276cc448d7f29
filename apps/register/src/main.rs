//! # SELAH POS Register
//!
//! Entry point for the interactive register.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging                                                  │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Load Configuration                                                  │
//! │     • SELAH_* environment variables over platform data-dir defaults     │
//! │                                                                         │
//! │  3. Start Session                                                       │
//! │     • Connect SQLite, run migrations, load catalog + clients            │
//! │     • Unreachable database → offline mode (manual-only catalog)         │
//! │                                                                         │
//! │  4. Run the Form Loop                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod checkout;
mod config;
mod error;
mod form;
mod session;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::RegisterConfig;
use session::RegisterSession;

#[tokio::main]
async fn main() {
    init_tracing();

    info!("Starting SELAH POS register");

    let config = RegisterConfig::from_env();
    if let Some(parent) = config.database_path.parent() {
        // Best effort; a failure here surfaces as offline mode.
        let _ = std::fs::create_dir_all(parent);
    }

    let session = RegisterSession::start(config).await;

    if let Err(e) = form::run(session).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=selah=trace` - Show trace for selah crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,selah=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
