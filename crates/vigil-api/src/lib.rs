// vigil-api: Async HTTP client for the Vigil sensor-monitoring backend.

pub mod auth;
pub mod client;
pub mod error;
pub mod events;
pub mod sensors;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
