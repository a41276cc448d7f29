//! # Register Error Type
//!
//! Unified error type for register actions.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Error Flow in the Register                            │
//! │                                                                         │
//! │  CoreError ───────┐                                                     │
//! │  CommitError ─────┤                                                     │
//! │  DbError ─────────┼──► AppError { code, message } ──► printed to the    │
//! │  RenderError ─────┤                                   cashier, form     │
//! │  dialoguer::Error ┘                                   stays editable    │
//! │                                                                         │
//! │  Nothing here is fatal: every error returns the register to an          │
//! │  editable, consistent state. Connection failures additionally flip      │
//! │  the session into offline (manual-only) mode.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use selah_core::{CommitError, CoreError};
use selah_db::DbError;
use selah_receipt::RenderError;

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Database unreachable (degraded mode)
    ConnectionError,

    /// Commit gate refused the sale
    CommitRefused,

    /// Ticket output failed
    TicketError,

    /// Anything unexpected
    Internal,
}

/// Error surfaced to the cashier.
#[derive(Debug, Clone, Error)]
#[error("[{code:?}] {message}")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Database-unreachable error (the degraded-mode trigger).
    pub fn connection(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConnectionError, message)
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::new(
                ErrorCode::NotFound,
                format!("Producto no encontrado: {}", id),
            ),
            CoreError::TooManyLines { .. } | CoreError::Validation(_) => {
                AppError::validation(err.to_string())
            }
        }
    }
}

/// Converts commit gate refusals to app errors.
impl From<CommitError> for AppError {
    fn from(err: CommitError) -> Self {
        let message = match &err {
            CommitError::NoItems => "No hay productos para registrar".to_string(),
            CommitError::InsufficientPayment { tendered, total } => format!(
                "El monto recibido ({}) es menor al total ({})",
                tendered, total
            ),
        };
        AppError::new(ErrorCode::CommitRefused, message)
    }
}

/// Converts database errors to app errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                AppError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
            }
            DbError::UniqueViolation { field, value } => AppError::validation(format!(
                "{} '{}' already exists",
                field, value
            )),
            DbError::ConnectionFailed(e) => {
                AppError::connection(format!("No se pudo conectar a la base de datos: {}", e))
            }
            DbError::PoolExhausted => {
                AppError::connection("No se pudo conectar a la base de datos")
            }
            other => {
                // Log the precise failure, show a generic message
                tracing::error!("Database error: {}", other);
                AppError::new(ErrorCode::DatabaseError, "La operación de base de datos falló")
            }
        }
    }
}

/// Converts render errors to app errors.
impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::new(
            ErrorCode::TicketError,
            format!("No se pudo guardar el ticket: {}", err),
        )
    }
}

/// Converts prompt failures (terminal I/O) to app errors.
impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::new(ErrorCode::Internal, err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use selah_core::Money;

    #[test]
    fn test_commit_refusal_messages() {
        let err: AppError = CommitError::NoItems.into();
        assert_eq!(err.code, ErrorCode::CommitRefused);
        assert_eq!(err.message, "No hay productos para registrar");

        let err: AppError = CommitError::InsufficientPayment {
            tendered: Money::from_cents(5000),
            total: Money::from_cents(6250),
        }
        .into();
        assert!(err.message.contains("$50.00"));
        assert!(err.message.contains("$62.50"));
    }

    #[test]
    fn test_connection_error_maps_to_degraded_code() {
        let err: AppError = DbError::ConnectionFailed("refused".to_string()).into();
        assert_eq!(err.code, ErrorCode::ConnectionError);
    }

    #[test]
    fn test_product_not_found_maps_to_not_found() {
        let err: AppError = selah_core::CoreError::ProductNotFound("9999".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("9999"));
    }
}
