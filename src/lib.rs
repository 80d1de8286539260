//! Blood-sugar reading storage on SQLite.
//!
//! # Intention
//!
//! - Keep one reading per row in a single `user` table.
//! - Expose create, filtered retrieve and delete plus table lifecycle helpers
//!   through a [`RecordStore`] handle.
//! - Return every failure to the caller as a [`StoreError`].
//!
//! # Architectural Boundaries
//!
//! - Only the data model and SQLite access belong here.
//! - No UI, no CLI, no connection pooling, no transactions spanning calls.

pub mod config;
pub mod error;
pub mod filter;
pub mod record;
pub mod report;
pub mod sqlite;
pub mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use filter::BloodSugarFilter;
pub use record::Record;
pub use store::RecordStore;
