//! Public artist page.

use dioxus::prelude::*;
use ui::views::ProfileView;

/// Keyed by `user_id` so moving between profiles reloads the data.
#[component]
pub fn Profile(user_id: String) -> Element {
    rsx! {
        ProfileView { key: "{user_id}", user_id: user_id.clone() }
    }
}
