//! Monitoring comments on recent posts through the LinkedIn REST API.

pub mod client;
pub mod error;
pub mod monitor;
pub mod transport;
pub mod types;

pub use client::LinkedInClient;
pub use error::ApiError;
pub use monitor::LinkedInMonitor;
pub use transport::{ApiTransport, HttpTransport, RawResponse};
pub use types::{Comment, Post, Profile};
