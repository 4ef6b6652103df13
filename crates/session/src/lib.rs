//! FitCoach client session library
//!
//! Keeps the signed-in user of an interactive client: OAuth2 authorization
//! code login, token persistence, a replay-latest session broadcast, bearer
//! token attachment for API calls and a route guard. Browser globals are
//! reached through [`env::Environment`] so the same code runs in a browser,
//! a native user agent, or headless, where it does nothing.

pub mod auth;
pub mod config;
pub mod env;
pub mod error;
pub mod services;
pub mod session;

pub use auth::{AuthGuard, AuthInterceptor, AuthService};
pub use config::AuthConfig;
pub use env::{Environment, Headless, MemoryEnvironment};
pub use error::{AuthError, TokenError};
pub use services::ApiClient;
pub use session::{SessionSnapshot, SessionState, Subscription, User};
