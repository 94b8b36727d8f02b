//! Authentication context and hooks for the UI.

use api::SessionUser;
use dioxus::prelude::*;

use crate::icons::FaRightFromBracket;
use crate::Icon;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    /// Session loaded and present.
    pub fn is_signed_in(&self) -> bool {
        !self.loading && self.user.is_some()
    }

    /// Session loaded and absent.
    pub fn is_signed_out(&self) -> bool {
        !self.loading && self.user.is_none()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the current session on mount
    let _ = use_resource(move || async move {
        match api::get_session().await {
            Ok(Some(user)) => auth_state.set(AuthState::signed_in(user)),
            Ok(None) => auth_state.set(AuthState::signed_out()),
            Err(e) => {
                tracing::error!("Failed to load session: {}", e);
                auth_state.set(AuthState::signed_out());
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to log out the current user, then go back to the login page.
#[component]
pub fn LogoutButton(
    #[props(default = "Sair".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let nav = use_navigator();

    let onclick = move |_| async move {
        match api::logout().await {
            Ok(()) => {
                auth_state.set(AuthState::signed_out());
                nav.replace("/");
            }
            Err(e) => tracing::error!("Logout failed: {}", e),
        }
    };

    rsx! {
        button {
            class: "logout-btn {class}",
            onclick: onclick,
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            span { "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_is_neither_signed_in_nor_out() {
        let state = AuthState::default();
        assert!(!state.is_signed_in());
        assert!(!state.is_signed_out());

        assert!(AuthState::signed_out().is_signed_out());
        assert!(AuthState::signed_in(SessionUser::default()).is_signed_in());
    }
}
