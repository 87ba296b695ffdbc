//! Data models
//!
//! Shapes delivered by the remote restaurant API or sent to it.

pub mod business_hours;
pub mod verification;

// Re-exports
pub use business_hours::*;
pub use verification::*;
