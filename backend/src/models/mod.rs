//! Database models for the Market Connect API
//!
//! Re-exports models from the shared crate; row mapping structs live
//! next to the services that read them.

pub use shared::models::*;
