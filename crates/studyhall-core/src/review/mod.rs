//! Review module
//!
//! Handles the course review feed with destructive edits and lineage
//! tracking.

pub mod manager;
pub mod model;

pub use manager::ReviewManager;
pub use model::Review;
