//! Re-authentication dialog shown when the session is missing or expired.

use api::SessionUser;
use dioxus::prelude::*;

use crate::alert::{error_text, AlertHost, AlertMessage};
use crate::auth::{use_auth, AuthState};
use crate::icons::{FaEye, FaEyeSlash};
use crate::views::ModalOverlay;
use crate::Icon;

#[component]
pub fn LoginDialog(on_close: EventHandler<()>, on_success: EventHandler<SessionUser>) -> Element {
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut password_visible = use_signal(|| false);
    let mut loading = use_signal(|| false);
    let mut alert = use_signal(|| None::<AlertMessage>);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            loading.set(true);
            match api::login(email(), password()).await {
                Ok(user) => {
                    auth.set(AuthState::signed_in(user.clone()));
                    on_success.call(user);
                }
                Err(e) => {
                    tracing::error!("Re-authentication failed: {}", e);
                    alert.set(Some(AlertMessage::error(
                        "Erro!",
                        error_text(&e, "Credenciais inválidas"),
                    )));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        AlertHost { alert }

        ModalOverlay {
            title: "Confirme Seus Dados",
            on_close: move |_| {
                if !loading() {
                    on_close.call(());
                }
            },

            p { class: "muted", "Sua sessão expirou. Informe seu Email e Senha para continuar" }

            form {
                class: "form-stack",
                onsubmit: handle_submit,

                label { r#for: "login-dialog-email", "Email" }
                input {
                    id: "login-dialog-email",
                    r#type: "email",
                    placeholder: "Digite seu email",
                    required: true,
                    disabled: loading(),
                    value: email(),
                    oninput: move |evt| email.set(evt.value()),
                }

                label { r#for: "login-dialog-password", "Senha" }
                div {
                    class: "password-field",
                    input {
                        id: "login-dialog-password",
                        r#type: if password_visible() { "text" } else { "password" },
                        placeholder: "Digite sua senha",
                        required: true,
                        disabled: loading(),
                        value: password(),
                        oninput: move |evt| password.set(evt.value()),
                    }
                    button {
                        class: "icon-btn",
                        r#type: "button",
                        disabled: loading(),
                        onclick: move |_| password_visible.toggle(),
                        if password_visible() {
                            Icon { icon: FaEyeSlash, width: 14, height: 14 }
                        } else {
                            Icon { icon: FaEye, width: 14, height: 14 }
                        }
                    }
                }

                div {
                    class: "form-actions",
                    button {
                        class: "secondary",
                        r#type: "button",
                        disabled: loading(),
                        onclick: move |_| on_close.call(()),
                        "Cancelar"
                    }
                    button {
                        class: "primary",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Entrando..." } else { "Entrar" }
                    }
                }
            }
        }
    }
}
