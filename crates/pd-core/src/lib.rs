//! pd-core: shared types, IDs, errors, and configuration.
//!
//! This crate is the foundational dependency for all other pd-* crates,
//! providing the rating-key identifier, a unified error type, the media
//! domain types handed to presentation, and application configuration.

pub mod config;
pub mod error;
pub mod ids;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::*;
pub use media::*;
