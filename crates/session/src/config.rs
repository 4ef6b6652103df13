//! Session configuration

use crate::error::{AuthError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Scopes requested from the provider when none are configured
pub const DEFAULT_SCOPES: &str = "email openid profile";

/// Path segment stripped from the redirect URI to build the post-logout URI
pub const DEFAULT_CALLBACK_PATH: &str = "/callback";

/// OAuth2 provider and API settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Provider host (`auth.example.com`) or full origin (`http://127.0.0.1:9000`)
    pub domain: String,

    /// OAuth2 client id
    pub client_id: String,

    /// Where the provider sends the user back with `?code=`
    pub redirect_uri: String,

    /// Base URL of the application API; only requests below it get a bearer token
    pub api_base_url: String,

    /// Space separated scopes
    #[serde(default = "default_scopes")]
    pub scopes: String,

    #[serde(default = "default_callback_path")]
    pub callback_path: String,
}

fn default_scopes() -> String {
    DEFAULT_SCOPES.to_string()
}

fn default_callback_path() -> String {
    DEFAULT_CALLBACK_PATH.to_string()
}

impl AuthConfig {
    pub fn new(
        domain: impl Into<String>,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            api_base_url: api_base_url.into(),
            scopes: default_scopes(),
            callback_path: default_callback_path(),
        }
    }

    /// Provider origin without a trailing slash
    pub fn provider_origin(&self) -> String {
        let domain = self.domain.trim_end_matches('/');
        if domain.contains("://") {
            domain.to_string()
        } else {
            format!("https://{domain}")
        }
    }

    /// Redirect URI with the trailing callback path removed
    pub fn post_logout_uri(&self) -> &str {
        self.redirect_uri
            .strip_suffix(self.callback_path.as_str())
            .unwrap_or(&self.redirect_uri)
    }

    /// Check the configuration and derive the provider endpoints
    pub fn endpoints(&self) -> Result<Endpoints> {
        if self.domain.trim().is_empty() {
            return Err(AuthError::configuration("domain is required"));
        }
        if self.client_id.trim().is_empty() {
            return Err(AuthError::configuration("client_id is required"));
        }
        Url::parse(&self.redirect_uri)
            .map_err(|e| AuthError::configuration(format!("redirect_uri: {e}")))?;
        let api_base = Url::parse(&self.api_base_url)
            .map_err(|e| AuthError::configuration(format!("api_base_url: {e}")))?;

        let origin = self.provider_origin();
        let parse = |path: &str| {
            Url::parse(&format!("{origin}{path}"))
                .map_err(|e| AuthError::configuration(format!("domain: {e}")))
        };

        let mut authorize = parse("/oauth2/authorize")?;
        authorize
            .query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.scopes)
            .append_pair("redirect_uri", &self.redirect_uri);

        let mut logout = parse("/logout")?;
        logout
            .query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("logout_uri", self.post_logout_uri());

        let token = parse(fitcoach_http::client::oauth::TOKEN_PATH)?;

        Ok(Endpoints {
            origin,
            authorize,
            token,
            logout,
            api_base,
        })
    }
}

/// Provider URLs derived once from [`AuthConfig`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub origin: String,
    pub authorize: Url,
    pub token: Url,
    pub logout: Url,
    /// Parsed `api_base_url`; requests below it carry the bearer token
    pub api_base: Url,
}
