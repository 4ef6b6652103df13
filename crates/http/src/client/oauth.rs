//! OAuth2 provider client methods

use super::{ClientError, HttpClient};
use crate::types::TokenPair;
use reqwest::Method;

/// Token endpoint path, relative to the provider origin
pub const TOKEN_PATH: &str = "/oauth2/token";

/// Parameters of an authorization code exchange
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationCodeGrant<'a> {
    pub client_id: &'a str,
    pub code: &'a str,
    pub redirect_uri: &'a str,
}

impl AuthorizationCodeGrant<'_> {
    fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id),
            ("code", self.code),
            ("redirect_uri", self.redirect_uri),
        ]
    }
}

impl HttpClient {
    /// Exchange an authorization code for a token pair
    ///
    /// Sends a form-encoded POST to the provider token endpoint. Any non-2xx
    /// answer is mapped through [`ClientError::from_status`].
    pub async fn exchange_authorization_code(
        &self,
        grant: AuthorizationCodeGrant<'_>,
    ) -> Result<TokenPair, ClientError> {
        let request = self
            .request(Method::POST, TOKEN_PATH)
            .form(&grant.form_fields());
        self.execute(request).await
    }
}
