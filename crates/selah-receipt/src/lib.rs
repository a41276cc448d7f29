//! # selah-receipt: Receipt Rendering for SELAH POS
//!
//! The rendering collaborator: consumes a finalized [`selah_core::Receipt`]
//! snapshot and produces a paginated printable ticket.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Receipt (immutable snapshot)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TicketRenderer::render ──► TicketDocument (pages of fixed-width text)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TicketRenderer::render_to_file ──► tickets/ticket_<sale id>.txt        │
//! │                                                                         │
//! │  Guarantees:                                                            │
//! │  • rendering is infallible - a missing logo degrades to a placeholder   │
//! │  • the item table paginates when it outgrows the page height            │
//! │  • only the final file write can fail                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod document;
pub mod error;
pub mod render;

pub use document::{TicketBuilder, TicketDocument};
pub use error::{RenderError, RenderResult};
pub use render::{RenderConfig, TicketRenderer};
