use dioxus::prelude::*;

use super::SettingsDraft;
use crate::icons::FaLock;
use crate::Icon;

/// Email and password changes. Any account change needs the current password.
#[component]
pub fn AccountForm(draft: Signal<SettingsDraft>) -> Element {
    let mut draft = draft;

    rsx! {
        article {
            class: "card settings-section",
            h2 {
                Icon { icon: FaLock, width: 16, height: 16 }
                span { "Dados da Conta" }
            }
            p { class: "muted", "Para alterar usuário, email ou senha, confirme sua senha atual" }

            div {
                class: "form-grid",
                div {
                    class: "form-field",
                    label { r#for: "settings-email", "Email" }
                    input {
                        id: "settings-email",
                        r#type: "email",
                        value: draft.read().user_mail.clone(),
                        oninput: move |evt| draft.write().user_mail = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "settings-new-password", "Nova senha" }
                    input {
                        id: "settings-new-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        placeholder: "Deixe em branco para manter",
                        value: draft.read().new_password.clone(),
                        oninput: move |evt| draft.write().new_password = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "settings-current-password", "Senha atual" }
                    input {
                        id: "settings-current-password",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: draft.read().current_password.clone(),
                        oninput: move |evt| draft.write().current_password = evt.value(),
                    }
                }
            }
        }
    }
}
