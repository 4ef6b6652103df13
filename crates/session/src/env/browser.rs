//! Browser environment backed by `window.localStorage` and `window.location`

use super::{Environment, Location, Storage};
use chrono::{DateTime, Utc};
use url::Url;
use wasm_bindgen::JsValue;

/// Environment of a page running in the browser
///
/// Construct it with [`BrowserEnvironment::detect`]; outside a window (web
/// worker, prerender) it reports itself as non-interactive.
pub struct BrowserEnvironment {
    window: Option<web_sys::Window>,
    storage: Option<LocalStorage>,
}

impl BrowserEnvironment {
    pub fn detect() -> Self {
        let window = web_sys::window();
        let storage = window
            .as_ref()
            .and_then(|w| w.local_storage().ok().flatten())
            .map(LocalStorage);
        Self { window, storage }
    }
}

impl Default for BrowserEnvironment {
    fn default() -> Self {
        Self::detect()
    }
}

impl Environment for BrowserEnvironment {
    fn storage(&self) -> Option<&dyn Storage> {
        self.storage.as_ref().map(|s| s as &dyn Storage)
    }

    fn location(&self) -> Option<&dyn Location> {
        self.window.as_ref().map(|w| w as &dyn Location)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn now(&self) -> DateTime<Utc> {
        let millis = js_sys::Date::now() as i64;
        DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
    }
}

struct LocalStorage(web_sys::Storage);

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Err(e) = self.0.set_item(key, value) {
            tracing::warn!(key, error = ?e, "Failed to write localStorage");
        }
    }

    fn remove_item(&self, key: &str) {
        if let Err(e) = self.0.remove_item(key) {
            tracing::warn!(key, error = ?e, "Failed to remove localStorage item");
        }
    }
}

impl Location for web_sys::Window {
    fn href(&self) -> Option<Url> {
        let href = self.location().href().ok()?;
        Url::parse(&href).ok()
    }

    fn assign(&self, url: &Url) {
        if let Err(e) = self.location().assign(url.as_str()) {
            tracing::error!(url = %url, error = ?e, "Navigation failed");
        }
    }

    fn replace(&self, url: &Url) {
        let result = self.history().and_then(|history| {
            history.replace_state_with_url(&JsValue::NULL, "", Some(url.as_str()))
        });
        if let Err(e) = result {
            tracing::warn!(url = %url, error = ?e, "Failed to replace history entry");
        }
    }
}
