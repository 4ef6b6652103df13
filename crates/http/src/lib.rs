//! FitCoach HTTP client
//!
//! Thin typed client shared by the session library: a base-URL-bound
//! `reqwest` client with status-to-error mapping, the OAuth2 authorization
//! code exchange, and the wire types of the workout plan API.

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::oauth::AuthorizationCodeGrant;
pub use client::{HttpClient, HttpClientBuilder};
pub use types::{ApiMessage, Exercise, ExerciseGroup, ExerciseItem, TokenPair, WorkoutPlan, WorkoutSession};
