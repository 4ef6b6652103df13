//! Authentication module

pub mod guard;
pub mod interceptor;
pub mod jwt;
pub mod service;

pub use guard::AuthGuard;
pub use interceptor::AuthInterceptor;
pub use jwt::{Claims, decode_claims};
pub use service::AuthService;
