//! Session models

use serde::Deserialize;

/// Profile returned by `GET /users/user`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub admin: bool,
}

/// Whether the dashboard runs with an authenticated user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    /// A token was found but the user has not been fetched yet
    Pending,
    LoggedIn,
}
