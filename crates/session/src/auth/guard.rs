//! Navigation guard for protected routes

use super::service::AuthService;
use std::rc::Rc;

/// Allows activation only while logged in; otherwise starts a login redirect
#[derive(Clone, Debug)]
pub struct AuthGuard {
    auth: Rc<AuthService>,
}

impl AuthGuard {
    pub fn new(auth: Rc<AuthService>) -> Self {
        Self { auth }
    }

    pub fn can_activate(&self) -> bool {
        if self.auth.is_logged_in() {
            return true;
        }
        self.auth.login();
        false
    }
}
