//! Services for the application API

pub mod api;

pub use api::ApiClient;
