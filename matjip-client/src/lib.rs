//! Matjip Client - client-side runtime for the restaurant API
//!
//! Provides the HTTP client, the email verification session and
//! logging setup. Pure domain logic lives in `shared`.

pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod verification;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::{ApiResponse, BusinessStatus, RestaurantHours};

pub use verification::{
    CodeSender, SessionSnapshot, TimerState, VerificationSession, VerificationTimer,
};
