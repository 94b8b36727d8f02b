//! Registration page. A successful registration signs the artist in.

use dioxus::prelude::*;

use crate::alert::{error_text, AlertHost, AlertMessage};
use crate::auth::{use_auth, AuthState};
use crate::icons::{FaEye, FaEyeSlash};
use crate::Icon;

#[component]
pub fn RegisterView() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut password_visible = use_signal(|| false);
    let mut loading = use_signal(|| false);
    let mut alert = use_signal(|| None::<AlertMessage>);

    // If already logged in, redirect home
    use_effect(move || {
        if auth().is_signed_in() {
            nav.replace("/home");
        }
    });

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            loading.set(true);
            match api::register(name(), email(), password()).await {
                Ok(user) => {
                    auth.set(AuthState::signed_in(user));
                    nav.push("/home");
                }
                Err(e) => {
                    tracing::error!("Registration failed: {}", e);
                    alert.set(Some(AlertMessage::error(
                        "Erro ao cadastrar usuário",
                        error_text(&e, "Erro ao cadastrar usuário"),
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
                h1 { "Criar Conta" }

                form {
                    class: "form-stack",
                    onsubmit: handle_register,

                    label { r#for: "register-name", "Nome" }
                    input {
                        id: "register-name",
                        r#type: "text",
                        placeholder: "Digite seu nome",
                        required: true,
                        value: name(),
                        oninput: move |evt| name.set(evt.value()),
                    }

                    label { r#for: "register-email", "Email" }
                    input {
                        id: "register-email",
                        r#type: "email",
                        placeholder: "Digite seu email",
                        required: true,
                        value: email(),
                        oninput: move |evt| email.set(evt.value()),
                    }

                    label { r#for: "register-password", "Senha" }
                    div {
                        class: "password-field",
                        input {
                            id: "register-password",
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
                        if loading() { "Carregando..." } else { "Criar Conta" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Já tem uma conta? "
                    Link { to: "/", "Faça login" }
                }
            }
        }
    }
}
