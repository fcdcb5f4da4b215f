//! # Session Commands
//!
//! Local sign-in: any non-empty username is accepted.

use storefront_core::auth::AuthAction;

use crate::state::ShellState;

pub async fn login(state: &ShellState, username: String) -> String {
    let message = format!("Signed in as {}.", username);
    state
        .storefront
        .dispatch(AuthAction::sign_in(username))
        .await;
    message
}

pub async fn logout(state: &ShellState) -> String {
    state.storefront.dispatch(AuthAction::SignOut).await;
    "Signed out.".to_string()
}

pub fn whoami(state: &ShellState) -> String {
    state.storefront.with_store(|s| match s.auth.user() {
        Some(user) => format!(
            "{} (signed in {})",
            user.username,
            user.signed_in_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => "Not signed in.".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;

    #[tokio::test]
    async fn test_login_logout() {
        let (state, _search) = testing::shell().await;
        assert_eq!(whoami(&state), "Not signed in.");

        assert_eq!(login(&state, "emilys".into()).await, "Signed in as emilys.");
        assert!(whoami(&state).starts_with("emilys (signed in "));

        logout(&state).await;
        assert_eq!(whoami(&state), "Not signed in.");
    }
}
