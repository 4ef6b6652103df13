//! Execution environment capabilities
//!
//! The session library never touches browser globals directly. Storage and
//! location are reached through an [`Environment`], so the same service runs
//! in a browser, in a native user agent, or in a non-interactive context
//! (server render, background job) where both capabilities are absent and
//! every session operation degrades into a no-op.

mod memory;

#[cfg(target_arch = "wasm32")]
mod browser;

pub use memory::{MemoryEnvironment, MemoryStorage};

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserEnvironment;

use chrono::{DateTime, Utc};
use url::Url;

/// Persistent key/value storage scoped to one origin
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str);

    /// Removing a key that is not present is a no-op
    fn remove_item(&self, key: &str);
}

/// The user agent's address bar
pub trait Location {
    /// Currently displayed URL
    fn href(&self) -> Option<Url>;

    /// Full-page navigation
    fn assign(&self, url: &Url);

    /// Replace the displayed URL without reloading
    fn replace(&self, url: &Url);
}

/// Capabilities available to the session library
pub trait Environment {
    fn storage(&self) -> Option<&dyn Storage>;

    fn location(&self) -> Option<&dyn Location>;

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Whether a user agent with storage and navigation is present
    fn is_interactive(&self) -> bool {
        self.storage().is_some() && self.location().is_some()
    }
}

/// Non-interactive context: no storage, no navigation
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl Environment for Headless {
    fn storage(&self) -> Option<&dyn Storage> {
        None
    }

    fn location(&self) -> Option<&dyn Location> {
        None
    }
}
