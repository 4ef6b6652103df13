//! Session state: the signed-in user and the storage it is persisted in

pub mod state;
pub mod store;

pub use state::{Broadcast, Subscription};
pub use store::{StorageKey, TokenStore};

use serde::{Deserialize, Serialize};

/// Identity of the signed-in user, derived from ID token claims
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// The current user, or `None` when anonymous
pub type SessionSnapshot = Option<User>;

/// Replay-latest broadcast of the session snapshot
pub type SessionState = Broadcast<SessionSnapshot>;
