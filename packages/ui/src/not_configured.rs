use dioxus::prelude::*;

use crate::icons::FaUser;
use crate::Icon;

/// Fallback for artists who never filled their profile, or whose profile could not be loaded.
#[component]
pub fn NotConfigured() -> Element {
    rsx! {
        main {
            class: "page page--centered",
            div {
                class: "not-configured",
                div {
                    class: "not-configured-icon",
                    Icon { icon: FaUser, width: 32, height: 32 }
                }
                h1 { "Perfil Não Configurado" }
                p { class: "muted", "Este usuário ainda não possui dados salvos em seu perfil." }
            }
        }
    }
}
