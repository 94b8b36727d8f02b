//! Public artist page, reachable without signing in.

use dioxus::prelude::*;

use crate::not_configured::NotConfigured;
use crate::profile_header::ProfileHeader;

#[component]
pub fn ProfileView(user_id: String) -> Element {
    let id = user_id.clone();
    let profile = use_resource(move || {
        let id = id.clone();
        async move {
            match api::get_public_profile(id.clone()).await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::error!(user_id = %id, "Failed to load profile: {}", e);
                    None
                }
            }
        }
    });

    match profile() {
        None => rsx! {
            div { class: "page page--centered", p { class: "muted", "Carregando..." } }
        },
        Some(Some(profile)) if profile.is_configured() => rsx! {
            main {
                class: "page profile-page",
                ProfileHeader { user_id, profile }
            }
        },
        Some(_) => rsx! { NotConfigured {} },
    }
}
