//! # Auth Slice
//!
//! A signed-in user or none. Sign-in is local: no credentials are checked
//! and nothing goes over the network.
//!
//! The slice only records the session. Gating cart and checkout behind it
//! is the UI layer's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Transition;

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub signed_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    SignIn { username: String, at: DateTime<Utc> },
    SignOut,
}

impl AuthAction {
    /// Sign-in stamped with the current time.
    pub fn sign_in(username: impl Into<String>) -> Self {
        AuthAction::SignIn {
            username: username.into(),
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    user: Option<User>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: AuthAction) -> Transition {
        let before = self.user.clone();

        self.user = match action {
            AuthAction::SignIn { username, at } => Some(User {
                username,
                signed_in_at: at,
            }),
            AuthAction::SignOut => None,
        };

        if self.user == before {
            Transition::Unchanged
        } else {
            Transition::Changed
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_and_out() {
        let mut auth = AuthState::new();
        assert!(!auth.is_authenticated());

        auth.apply(AuthAction::sign_in("emilys"));
        assert!(auth.is_authenticated());
        assert_eq!(auth.user().map(|u| u.username.as_str()), Some("emilys"));

        assert_eq!(auth.apply(AuthAction::SignOut), Transition::Changed);
        assert!(auth.user().is_none());
        assert_eq!(auth.apply(AuthAction::SignOut), Transition::Unchanged);
    }
}
