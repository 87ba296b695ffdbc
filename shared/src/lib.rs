//! Shared types for the Matjip client
//!
//! Pure domain types and logic used by the presentation layer:
//! business hours and status evaluation, verification DTOs,
//! image URL helpers and the API response envelope.

pub mod error;
pub mod image;
pub mod models;
pub mod response;
pub mod status;

// Re-exports
pub use error::{HoursError, ValidationError, ValidationResult};
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
pub use status::{BusinessStatus, ClosedReason, RestaurantHours, evaluate};
