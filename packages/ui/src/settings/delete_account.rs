use dioxus::prelude::*;

use crate::alert::{error_text, AlertMessage};
use crate::auth::{use_auth, AuthState};
use crate::icons::FaTrash;
use crate::Icon;

/// Permanently delete the account, then leave the signed-in area.
#[component]
pub fn DeleteAccountForm(alert: Signal<Option<AlertMessage>>) -> Element {
    let mut alert = alert;
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirming = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let handle_delete = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            if email().trim().is_empty() || password().is_empty() {
                alert.set(Some(AlertMessage::error("Erro", "Informe email e senha para excluir a conta")));
                return;
            }

            deleting.set(true);
            match api::delete_account(email(), password()).await {
                Ok(()) => {
                    auth.set(AuthState::signed_out());
                    nav.replace("/");
                }
                Err(e) => {
                    tracing::error!("Account deletion failed: {}", e);
                    password.set(String::new());
                    alert.set(Some(AlertMessage::error("Erro", error_text(&e, "Erro ao excluir conta"))));
                }
            }
            deleting.set(false);
        });
    };

    rsx! {
        article {
            class: "card settings-section settings-section--danger",
            h2 {
                Icon { icon: FaTrash, width: 16, height: 16 }
                span { "Excluir Conta" }
            }
            p { class: "muted", "Esta ação é permanente. Seu perfil público deixará de existir." }

            if confirming() {
                form {
                    class: "form-stack",
                    onsubmit: handle_delete,
                    input {
                        r#type: "email",
                        placeholder: "Confirme seu email",
                        disabled: deleting(),
                        value: email(),
                        oninput: move |evt| email.set(evt.value()),
                    }
                    input {
                        r#type: "password",
                        placeholder: "Confirme sua senha",
                        disabled: deleting(),
                        value: password(),
                        oninput: move |evt| password.set(evt.value()),
                    }
                    div {
                        class: "form-actions",
                        button {
                            class: "secondary",
                            r#type: "button",
                            disabled: deleting(),
                            onclick: move |_| {
                                confirming.set(false);
                                password.set(String::new());
                            },
                            "Cancelar"
                        }
                        button {
                            class: "danger",
                            r#type: "submit",
                            disabled: deleting(),
                            if deleting() { "Excluindo..." } else { "Excluir definitivamente" }
                        }
                    }
                }
            } else {
                button {
                    class: "danger",
                    onclick: move |_| confirming.set(true),
                    "Excluir minha conta"
                }
            }
        }
    }
}
