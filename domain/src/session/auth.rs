//! Authentication session state.
//!
//! Tracks the current operator, a login-attempt counter, and the last
//! successful login time. Owned by the session wiring and passed
//! explicitly; there is no ambient global state.

use chrono::{DateTime, Utc};

use crate::session::user::User;

/// Mutable authentication state for one running client.
#[derive(Debug, Default)]
pub struct AuthSession {
    user: Option<User>,
    authenticated: bool,
    login_attempts: u32,
    last_login: Option<DateTime<Utc>>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful login: store the user, reset the attempt
    /// counter, stamp the time.
    pub fn record_login(&mut self, user: User) {
        self.user = Some(user);
        self.authenticated = true;
        self.login_attempts = 0;
        self.last_login = Some(Utc::now());
    }

    /// Record a failed login attempt; returns the new attempt count.
    pub fn record_failure(&mut self) -> u32 {
        self.login_attempts += 1;
        self.login_attempts
    }

    /// Clear the session.
    pub fn logout(&mut self) -> Option<User> {
        self.authenticated = false;
        self.user.take()
    }

    /// A session is valid only when a user is present and the
    /// authenticated flag is set.
    pub fn is_valid(&self) -> bool {
        self.user.is_some() && self.authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn login_attempts(&self) -> u32 {
        self.login_attempts
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    /// Bearer token of the current user, if logged in.
    pub fn token(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.token.as_str())
    }
}
