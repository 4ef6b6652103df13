//! Bearer token attachment for API requests

use super::service::AuthService;
use reqwest::Request;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use std::rc::Rc;
use tracing::{trace, warn};
use url::Url;

/// Adds `Authorization: Bearer <id token>` to requests bound for the API
///
/// Requests to any other host, or made while logged out, pass through
/// untouched. Expired tokens are not refreshed and 401s are not retried.
#[derive(Clone, Debug)]
pub struct AuthInterceptor {
    auth: Rc<AuthService>,
    api_base: Url,
}

impl AuthInterceptor {
    pub fn new(auth: Rc<AuthService>) -> Self {
        let api_base = auth.endpoints().api_base.clone();
        Self { auth, api_base }
    }

    pub fn api_base_url(&self) -> &str {
        &self.auth.config().api_base_url
    }

    /// Same scheme, host and port as the API base, with the base path as a
    /// whole-segment prefix of the request path
    pub fn is_api_request(&self, url: &Url) -> bool {
        let base = &self.api_base;
        if url.scheme() != base.scheme()
            || url.host_str() != base.host_str()
            || url.port_or_known_default() != base.port_or_known_default()
        {
            return false;
        }

        let base_path = base.path().trim_end_matches('/');
        url.path()
            .strip_prefix(base_path)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    pub fn intercept(&self, mut request: Request) -> Request {
        if !self.is_api_request(request.url()) {
            return request;
        }
        let Some(token) = self.auth.id_token() else {
            return request;
        };
        if !self.auth.is_logged_in() {
            trace!(url = %request.url(), "Not logged in, sending request without credentials");
            return request;
        }

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(e) => warn!(error = %e, "Stored ID token is not a valid header value"),
        }
        request
    }
}
