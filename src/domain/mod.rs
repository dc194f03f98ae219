//! # Domain Layer
//!
//! Conversation model, mode and prompt table, and the relay error taxonomy.
//! This layer is independent of HTTP frameworks and clients.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
