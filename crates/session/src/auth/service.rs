//! Authentication lifecycle
//!
//! ```text
//! ANONYMOUS --(callback success)--> AUTHENTICATED --(logout | expiry seen)--> ANONYMOUS
//! ```
//!
//! `is_logged_in` is derived from the stored ID token on every call; the
//! cached [`User`] is only replaced by a successful callback or cleared by
//! logout, so it may still name the previous user after the token expired.

use super::jwt;
use crate::config::{AuthConfig, Endpoints};
use crate::env::Environment;
use crate::error::Result;
use crate::session::{SessionSnapshot, SessionState, StorageKey, Subscription, TokenStore, User};
use fitcoach_http::{AuthorizationCodeGrant, HttpClient};
use std::rc::Rc;
use tracing::{debug, error, info, warn};

/// Owns the token store and session state, and drives the OAuth2 flow
pub struct AuthService {
    config: AuthConfig,
    endpoints: Endpoints,
    env: Rc<dyn Environment>,
    store: TokenStore,
    session: SessionState,
    provider: HttpClient,
}

impl AuthService {
    /// Create the service and restore the cached user, if any
    pub fn new(config: AuthConfig, env: Rc<dyn Environment>) -> Result<Self> {
        let endpoints = config.endpoints()?;
        let provider = HttpClient::new(endpoints.origin.clone())?;
        let store = TokenStore::new(Rc::clone(&env));

        let cached = if env.is_interactive() {
            store.load_user()
        } else {
            None
        };
        debug!(restored = cached.is_some(), "Auth service initialized");

        Ok(Self {
            config,
            endpoints,
            env,
            store,
            session: SessionState::new(cached),
            provider,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Redirect the user agent to the provider's authorization endpoint
    pub fn login(&self) {
        let Some(location) = self.env.location() else {
            debug!("Login skipped: no user agent");
            return;
        };
        info!("Redirecting to identity provider");
        location.assign(&self.endpoints.authorize);
    }

    /// Complete the authorization code flow from the current URL
    ///
    /// Does nothing when the URL carries no `code`. Any failure is logged and
    /// leaves the session logged out; the outcome is observable through
    /// [`Self::user`] and [`Self::is_logged_in`].
    pub async fn handle_callback(&self) {
        let Some(code) = self.callback_code() else {
            return;
        };

        match self.exchange(&code).await {
            Ok(user) => info!(user_id = %user.id, "Signed in"),
            Err(e) => {
                error!(error = %e, "Authorization callback failed");
                self.logout();
            }
        }
    }

    fn callback_code(&self) -> Option<String> {
        let url = self.env.location()?.href()?;
        let mut code = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" if code.is_none() && !value.is_empty() => code = Some(value.into_owned()),
                "error" => warn!(error = %value, "Identity provider returned an error"),
                _ => {}
            }
        }
        if code.is_none() {
            debug!("No authorization code in callback URL");
        }
        code
    }

    async fn exchange(&self, code: &str) -> Result<User> {
        let tokens = self
            .provider
            .exchange_authorization_code(AuthorizationCodeGrant {
                client_id: &self.config.client_id,
                code,
                redirect_uri: &self.config.redirect_uri,
            })
            .await?;
        self.store.store_tokens(&tokens);

        let user = jwt::decode_claims(&tokens.id_token)?.to_user()?;
        self.store.store_user(&user)?;
        self.session.set(Some(user.clone()));

        self.strip_callback_query();
        Ok(user)
    }

    fn strip_callback_query(&self) {
        let Some(location) = self.env.location() else {
            return;
        };
        if let Some(mut url) = location.href() {
            url.set_query(None);
            location.replace(&url);
        }
    }

    pub fn id_token(&self) -> Option<String> {
        self.store.get(StorageKey::IdToken)
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(StorageKey::AccessToken)
    }

    /// Current session snapshot
    pub fn user(&self) -> SessionSnapshot {
        self.session.current()
    }

    /// Observe the session snapshot; `listener` runs immediately with the
    /// current value and after every change
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionSnapshot) + 'static,
    {
        self.session.subscribe(listener)
    }

    /// Whether a stored ID token exists and has not expired
    pub fn is_logged_in(&self) -> bool {
        let Some(token) = self.id_token() else {
            return false;
        };
        match jwt::decode_claims(&token) {
            Ok(claims) => !claims.is_expired_at(self.env.now()),
            Err(e) => {
                error!(error = %e, "Failed to decode stored ID token");
                false
            }
        }
    }

    /// Clear the session and redirect to the provider's logout endpoint
    pub fn logout(&self) {
        let Some(location) = self.env.location().filter(|_| self.env.is_interactive()) else {
            debug!("Logout skipped: no user agent");
            return;
        };
        self.store.clear();
        self.session.set(None);
        info!("Signed out");
        location.assign(&self.endpoints.logout);
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("client_id", &self.config.client_id)
            .field("provider", &self.endpoints.origin)
            .field("user", &self.session.current())
            .finish_non_exhaustive()
    }
}
