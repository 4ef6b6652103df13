//! In-memory environment

use super::{Environment, Location, Storage};
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use url::Url;

/// Interactive environment backed by process memory
///
/// Navigations are recorded instead of performed, and the clock can be
/// pinned, which makes it the environment of choice for tests and for
/// embedders that persist the session themselves.
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    storage: MemoryStorage,
    location: MemoryLocation,
    now: Cell<Option<DateTime<Utc>>>,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given URL in the address bar
    pub fn with_url(url: Url) -> Self {
        let env = Self::new();
        env.location.set_current(url);
        env
    }

    /// Simulate the provider redirecting the user agent to `url`
    pub fn set_url(&self, url: Url) {
        self.location.set_current(url);
    }

    /// Every full-page navigation performed so far, oldest first
    pub fn navigations(&self) -> Vec<Url> {
        self.location.assigned.borrow().clone()
    }

    /// Pin the clock; `None` returns to wall-clock time
    pub fn set_now(&self, now: Option<DateTime<Utc>>) {
        self.now.set(now);
    }

    /// Direct access to stored values, for seeding and assertions
    pub fn store(&self) -> &MemoryStorage {
        &self.storage
    }

    pub fn current_url(&self) -> Option<Url> {
        self.location.href()
    }
}

impl Environment for MemoryEnvironment {
    fn storage(&self) -> Option<&dyn Storage> {
        Some(&self.storage)
    }

    fn location(&self) -> Option<&dyn Location> {
        Some(&self.location)
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.get().unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[derive(Debug, Default)]
struct MemoryLocation {
    current: RefCell<Option<Url>>,
    assigned: RefCell<Vec<Url>>,
}

impl MemoryLocation {
    fn set_current(&self, url: Url) {
        *self.current.borrow_mut() = Some(url);
    }
}

impl Location for MemoryLocation {
    fn href(&self) -> Option<Url> {
        self.current.borrow().clone()
    }

    fn assign(&self, url: &Url) {
        self.assigned.borrow_mut().push(url.clone());
        self.set_current(url.clone());
    }

    fn replace(&self, url: &Url) {
        self.set_current(url.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_roundtrip_and_remove_missing() {
        let env = MemoryEnvironment::new();
        let storage = env.storage().unwrap();

        storage.set_item("k", "v1");
        storage.set_item("k", "v2");
        assert_eq!(storage.get_item("k").as_deref(), Some("v2"));

        storage.remove_item("k");
        storage.remove_item("k");
        assert!(storage.get_item("k").is_none());
    }

    #[test]
    fn test_navigation_is_recorded() {
        let env = MemoryEnvironment::new();
        let url = Url::parse("https://auth.example.com/login").unwrap();

        env.location().unwrap().assign(&url);
        env.location()
            .unwrap()
            .replace(&Url::parse("https://app.example.com/").unwrap());

        assert_eq!(env.navigations(), vec![url]);
        assert_eq!(env.current_url().unwrap().as_str(), "https://app.example.com/");
    }
}
