//! Landing page: email and password sign-in.

use dioxus::prelude::*;

use crate::alert::{error_text, AlertHost, AlertMessage};
use crate::auth::{use_auth, AuthState};
use crate::icons::{FaEye, FaEyeSlash, FaMusic};
use crate::Icon;

#[component]
pub fn LoginView() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut password_visible = use_signal(|| false);
    let mut loading = use_signal(|| false);
    let mut alert = use_signal(|| None::<AlertMessage>);

    // Already signed in: go straight home
    use_effect(move || {
        if auth().is_signed_in() {
            nav.replace("/home");
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            if email().trim().is_empty() || password().is_empty() {
                alert.set(Some(AlertMessage::error("Erro ao entrar", "Informe email e senha")));
                return;
            }

            loading.set(true);
            match api::login(email(), password()).await {
                Ok(user) => {
                    auth.set(AuthState::signed_in(user));
                    nav.push("/home");
                }
                Err(e) => {
                    tracing::error!("Login failed: {}", e);
                    alert.set(Some(AlertMessage::error(
                        "Erro ao entrar",
                        error_text(&e, "Credenciais inválidas"),
                    )));
                }
            }
            loading.set(false);
        });
    };

    if auth().loading {
        return rsx! {
            div { class: "page page--centered", p { class: "muted", "Carregando..." } }
        };
    }

    rsx! {
        AlertHost { alert }

        div {
            class: "page page--centered",
            div {
                class: "card auth-card",
                div {
                    class: "brand",
                    div { class: "brand-mark", Icon { icon: FaMusic, width: 18, height: 18 } }
                    h1 { "TipMe Underground" }
                }
                p { class: "muted", "Entre para gerenciar seu perfil de artista" }

                form {
                    class: "form-stack",
                    onsubmit: handle_login,

                    label { r#for: "login-email", "Email" }
                    input {
                        id: "login-email",
                        r#type: "email",
                        placeholder: "Digite seu email",
                        required: true,
                        value: email(),
                        oninput: move |evt| email.set(evt.value()),
                    }

                    label { r#for: "login-password", "Senha" }
                    div {
                        class: "password-field",
                        input {
                            id: "login-password",
                            r#type: if password_visible() { "text" } else { "password" },
                            placeholder: "Digite sua senha",
                            required: true,
                            value: password(),
                            oninput: move |evt| password.set(evt.value()),
                        }
                        button {
                            class: "icon-btn",
                            r#type: "button",
                            onclick: move |_| password_visible.toggle(),
                            if password_visible() {
                                Icon { icon: FaEyeSlash, width: 14, height: 14 }
                            } else {
                                Icon { icon: FaEye, width: 14, height: 14 }
                            }
                        }
                    }

                    button {
                        class: "primary wide",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Entrando..." } else { "Entrar" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Não tem uma conta? "
                    Link { to: "/cadastro", "Cadastre-se" }
                }
            }
        }
    }
}
