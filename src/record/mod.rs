//! Normalized application records
//!
//! The final output shape handed to a host launcher, plus the builder that
//! produces it from a resolved candidate.

pub mod builder;
pub mod models;

// Public API re-exports
pub use builder::build_record;
pub use models::AppRecord;
