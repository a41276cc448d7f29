//! # Register Configuration
//!
//! Configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SELAH_*`)
//! 2. Platform defaults (this file)
//!
//! Configuration is read-only after initialization; no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use selah_receipt::RenderConfig;

/// Register configuration.
#[derive(Debug, Clone)]
pub struct RegisterConfig {
    /// Store name (title on receipts, logo placeholder).
    pub store_name: String,

    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Directory where rendered tickets are written.
    pub tickets_dir: PathBuf,

    /// Optional text logo asset for the ticket header.
    pub logo_path: Option<PathBuf>,
}

impl RegisterConfig {
    /// Builds configuration from environment variables over platform
    /// defaults.
    ///
    /// ## Environment Variables
    /// - `SELAH_STORE_NAME`: Override the store name
    /// - `SELAH_DB_PATH`: Override the database file path
    /// - `SELAH_TICKETS_DIR`: Override the ticket output directory
    /// - `SELAH_LOGO_PATH`: Point at a text logo asset
    ///
    /// ## Platform Defaults
    /// - **Linux**: `~/.local/share/selah-pos/selah.db`
    /// - **macOS**: `~/Library/Application Support/com.selah.pos/selah.db`
    /// - **Windows**: `%APPDATA%\selah\pos\selah.db`
    pub fn from_env() -> Self {
        let data_dir = ProjectDirs::from("com", "selah", "pos")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let database_path = std::env::var("SELAH_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("selah.db"));

        let tickets_dir = std::env::var("SELAH_TICKETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("tickets"));

        let store_name =
            std::env::var("SELAH_STORE_NAME").unwrap_or_else(|_| "SELAH".to_string());

        let logo_path = std::env::var("SELAH_LOGO_PATH").ok().map(PathBuf::from);

        RegisterConfig {
            store_name,
            database_path,
            tickets_dir,
            logo_path,
        }
    }

    /// Renderer configuration derived from the register settings.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            store_name: self.store_name.clone(),
            logo_path: self.logo_path.clone(),
            ..RenderConfig::default()
        }
    }
}
