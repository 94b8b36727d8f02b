//! Sign-in page served at `/`.

use dioxus::prelude::*;
use ui::views::LoginView;

#[component]
pub fn Landing() -> Element {
    rsx! {
        LoginView {}
    }
}
