//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Upstream completion clients (Groq over HTTPS, offline mock)
//! - The HTTP surface and CLI wiring

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
