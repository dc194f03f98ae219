//! # Application Layer
//!
//! The relay use case and the upstream client interface it depends on.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
