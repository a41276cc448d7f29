//! # Register Session
//!
//! Session-scoped state for one register: the catalog snapshot, the client
//! selection list, the in-progress sale draft, and the (optional) database
//! handle.
//!
//! ## Degraded Mode
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Startup                                                                │
//! │     │                                                                   │
//! │     ├── Database reachable ──► catalog = products + manual entry        │
//! │     │                          clients = registered list                │
//! │     │                                                                   │
//! │     └── Database down ───────► catalog = manual entry only              │
//! │                                clients = empty                          │
//! │                                db      = None (retry at commit)         │
//! │                                                                         │
//! │  Either way the form opens and manual sales keep working.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session owns its state exclusively: one register and one draft, so
//! there is no locking here at all.

use tracing::{info, warn};

use selah_core::{Catalog, ClientRef, SaleDraft};
use selah_db::{Database, DbConfig};

use crate::config::RegisterConfig;
use crate::error::AppError;

/// One register session: catalog, clients, draft, and storage handle.
pub struct RegisterSession {
    pub config: RegisterConfig,
    /// `None` while the database is unreachable.
    pub db: Option<Database>,
    pub catalog: Catalog,
    pub clients: Vec<ClientRef>,
    pub draft: SaleDraft,
}

impl RegisterSession {
    /// Starts a session, degrading to offline mode if the database is
    /// unreachable.
    pub async fn start(config: RegisterConfig) -> Self {
        let mut session = RegisterSession {
            config,
            db: None,
            catalog: Catalog::manual_only(),
            clients: Vec::new(),
            draft: SaleDraft::new(),
        };

        if !session.connect().await {
            warn!("Starting in offline mode: manual-only catalog, no client list");
        }

        session
    }

    /// Attempts to (re)connect and reload the catalog and client list.
    ///
    /// Returns whether the session is online afterwards. Failures degrade;
    /// they never propagate.
    pub async fn connect(&mut self) -> bool {
        let db_config = DbConfig::new(&self.config.database_path);

        match Database::new(db_config).await {
            Ok(db) => {
                self.db = Some(db);
                if let Err(e) = self.reload_reference_data().await {
                    warn!(error = %e, "Connected but reference data failed to load");
                }
                info!("Database connected");
                true
            }
            Err(e) => {
                warn!(error = %e, "Database unreachable");
                self.db = None;
                self.catalog = Catalog::manual_only();
                self.clients = Vec::new();
                false
            }
        }
    }

    /// Reloads the catalog snapshot and client selection list.
    pub async fn reload_reference_data(&mut self) -> Result<(), AppError> {
        let Some(db) = &self.db else {
            return Err(AppError::connection("Base de datos no disponible"));
        };

        let products = db.products().list().await?;
        self.catalog = Catalog::new(products);

        let clients = db.clients().list().await?;
        self.clients = clients.iter().map(|c| c.to_ref()).collect();

        info!(
            products = self.catalog.len(),
            clients = self.clients.len(),
            "Reference data loaded"
        );
        Ok(())
    }

    /// Whether the session is running without persistence.
    pub fn is_offline(&self) -> bool {
        self.db.is_none()
    }

    /// Starts a fresh sale (after a commit or an explicit clear).
    pub fn new_sale(&mut self) {
        self.draft.clear();
    }
}
