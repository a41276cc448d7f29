//! # Repository Module
//!
//! Database repository implementations for SELAH POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Register action                                                        │
//! │       │                                                                 │
//! │       │  db.sales().insert(&sale, &lines)                               │
//! │       ▼                                                                 │
//! │  SaleRepository ──► SQL, bindings, row mapping ──► SQLite               │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place per aggregate                           │
//! │  • Domain types never learn about rows or columns                       │
//! │  • Repositories are cheap clones over the shared pool                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`client::ClientRepository`] - Client listing and registration
//! - [`product::ProductRepository`] - Catalog load and maintenance
//! - [`sale::SaleRepository`] - Transactional sale commit and read-back

pub mod client;
pub mod product;
pub mod sale;
