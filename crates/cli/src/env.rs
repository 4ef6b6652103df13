//! Native user agent environment
//!
//! Session values live in a JSON file in the state directory. Navigation is
//! printed for the user to open in a browser; the redirect back is fed in
//! through the `callback` command.

use fitcoach_session::env::{Environment, Location, Storage};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;
use url::Url;

pub struct FileEnvironment {
    storage: FileStorage,
    location: TerminalLocation,
}

impl FileEnvironment {
    pub fn open(state_dir: &Path) -> Self {
        Self {
            storage: FileStorage::open(state_dir.join("session.json")),
            location: TerminalLocation::default(),
        }
    }

    /// Pretend the browser landed on `url`
    pub fn set_current_url(&self, url: Url) {
        *self.location.current.borrow_mut() = Some(url);
    }
}

impl Environment for FileEnvironment {
    fn storage(&self) -> Option<&dyn Storage> {
        Some(&self.storage)
    }

    fn location(&self) -> Option<&dyn Location> {
        Some(&self.location)
    }
}

struct FileStorage {
    path: PathBuf,
    items: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    fn open(path: PathBuf) -> Self {
        let items = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Discarding unreadable session file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self {
            path,
            items: RefCell::new(items),
        }
    }

    fn persist(&self) {
        let result = serde_json::to_string_pretty(&*self.items.borrow())
            .map_err(std::io::Error::other)
            .and_then(|content| {
                if let Some(parent) = self.path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&self.path, content)
            });
        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "Failed to write session file");
        }
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove_item(&self, key: &str) {
        let removed = self.items.borrow_mut().remove(key).is_some();
        if removed {
            self.persist();
        }
    }
}

#[derive(Default)]
struct TerminalLocation {
    current: RefCell<Option<Url>>,
}

impl Location for TerminalLocation {
    fn href(&self) -> Option<Url> {
        self.current.borrow().clone()
    }

    fn assign(&self, url: &Url) {
        println!("Open this URL in your browser:\n\n  {url}\n");
        *self.current.borrow_mut() = Some(url.clone());
    }

    fn replace(&self, url: &Url) {
        *self.current.borrow_mut() = Some(url.clone());
    }
}
