//! Token storage

use super::User;
use crate::env::Environment;
use fitcoach_http::TokenPair;
use std::rc::Rc;
use tracing::{debug, warn};

/// Keys persisted in the environment's storage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKey {
    IdToken,
    AccessToken,
    UserInfo,
}

impl StorageKey {
    pub const ALL: [Self; 3] = [Self::IdToken, Self::AccessToken, Self::UserInfo];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::IdToken => "id_token",
            Self::AccessToken => "access_token",
            Self::UserInfo => "user_info",
        }
    }
}

/// Persists the token pair and cached profile across reloads
///
/// Every operation is a no-op when the environment has no storage.
#[derive(Clone)]
pub struct TokenStore {
    env: Rc<dyn Environment>,
}

impl TokenStore {
    pub fn new(env: Rc<dyn Environment>) -> Self {
        Self { env }
    }

    pub fn get(&self, key: StorageKey) -> Option<String> {
        self.env.storage()?.get_item(key.as_str())
    }

    pub fn set(&self, key: StorageKey, value: &str) {
        match self.env.storage() {
            Some(storage) => storage.set_item(key.as_str(), value),
            None => debug!(key = key.as_str(), "No storage available, value dropped"),
        }
    }

    pub fn remove(&self, key: StorageKey) {
        if let Some(storage) = self.env.storage() {
            storage.remove_item(key.as_str());
        }
    }

    pub fn store_tokens(&self, tokens: &TokenPair) {
        self.set(StorageKey::IdToken, &tokens.id_token);
        self.set(StorageKey::AccessToken, &tokens.access_token);
    }

    pub fn store_user(&self, user: &User) -> Result<(), serde_json::Error> {
        let serialized = serde_json::to_string(user)?;
        self.set(StorageKey::UserInfo, &serialized);
        Ok(())
    }

    /// Cached profile; missing or corrupt entries read as no user
    pub fn load_user(&self) -> Option<User> {
        let stored = self.get(StorageKey::UserInfo)?;
        match serde_json::from_str(&stored) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Ignoring corrupt cached user profile");
                None
            }
        }
    }

    pub fn clear(&self) {
        for key in StorageKey::ALL {
            self.remove(key);
        }
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("available", &self.env.storage().is_some())
            .finish()
    }
}
