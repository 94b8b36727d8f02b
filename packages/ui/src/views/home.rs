//! Signed-in landing page.

use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::icons::{FaGear, FaMusic, FaUser};
use crate::login_dialog::LoginDialog;
use crate::Icon;

#[component]
pub fn HomeView() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut show_login = use_signal(|| false);

    // No session: back to the login page
    use_effect(move || {
        if auth().is_signed_out() {
            nav.replace("/");
        }
    });

    // Settings need an unexpired token; ask again for credentials otherwise
    let open_settings = move |_| async move {
        match api::get_session().await {
            Ok(Some(_)) => {
                nav.push("/settings");
            }
            Ok(None) => show_login.set(true),
            Err(e) => {
                tracing::error!("Failed to check session: {}", e);
                show_login.set(true);
            }
        }
    };

    let state = auth();
    let Some(user) = state.user.filter(|_| !state.loading) else {
        return rsx! {
            div { class: "page page--centered", p { class: "muted", "Carregando..." } }
        };
    };

    let greeting = user.display_name().to_string();
    let profile_href = user.user_id.as_ref().map(|id| format!("/profile/{}", id));

    rsx! {
        div {
            class: "page",
            header {
                class: "topbar",
                div {
                    class: "brand",
                    div { class: "brand-mark", Icon { icon: FaMusic, width: 18, height: 18 } }
                    h1 { "TipMe Underground" }
                }
                LogoutButton {}
            }

            section {
                class: "hero",
                h2 {
                    "Bem-vindo,"
                    br {}
                    span { class: "hero-name", "{greeting}" }
                }
                p {
                    class: "muted",
                    "Sua plataforma para conectar-se com fãs, compartilhar sua arte e receber apoio para seus projetos musicais."
                }

                div {
                    class: "hero-actions",
                    if let Some(href) = profile_href {
                        Link {
                            class: "button primary",
                            to: href,
                            Icon { icon: FaUser, width: 16, height: 16 }
                            span { "Ver Meu Perfil" }
                        }
                    }
                    button {
                        class: "secondary",
                        onclick: open_settings,
                        Icon { icon: FaGear, width: 16, height: 16 }
                        span { "Configurar Perfil" }
                    }
                }
            }
        }

        if show_login() {
            LoginDialog {
                on_close: move |_| show_login.set(false),
                on_success: move |_| {
                    show_login.set(false);
                    nav.push("/settings");
                },
            }
        }
    }
}
