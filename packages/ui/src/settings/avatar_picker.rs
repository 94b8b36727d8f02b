use dioxus::prelude::*;

use crate::alert::{error_text, AlertMessage};
use crate::auth::{use_auth, AuthState};
use crate::profile_header::DEFAULT_AVATAR;

/// Preset avatars an artist can choose from.
pub const AVATARS: [&str; 6] = [
    "/avatars/avatar1.svg",
    "/avatars/avatar2.svg",
    "/avatars/avatar3.svg",
    "/avatars/avatar4.svg",
    "/avatars/avatar5.svg",
    "/avatars/avatar6.svg",
];

/// Reject a pick that would not change anything, before any request is made.
pub fn check_avatar_choice(selected: &str, current: Option<&str>) -> Result<String, AlertMessage> {
    if selected.is_empty() {
        return Err(AlertMessage::error("Erro", "Selecione um avatar primeiro!"));
    }
    if current == Some(selected) {
        return Err(AlertMessage::warning("Aviso", "Este já é seu avatar atual!"));
    }
    Ok(selected.to_string())
}

#[component]
pub fn AvatarPicker(alert: Signal<Option<AlertMessage>>) -> Element {
    let mut alert = alert;
    let mut auth = use_auth();
    let current = auth().user.and_then(|u| u.avatar).filter(|a| !a.is_empty());
    let mut selected = use_signal(|| current.clone().unwrap_or_default());
    let mut saving = use_signal(|| false);

    let preview = if selected().is_empty() {
        current.clone().unwrap_or_else(|| DEFAULT_AVATAR.to_string())
    } else {
        selected()
    };
    let changed = !selected().is_empty() && Some(selected()) != current;

    let current_for_save = current.clone();
    let handle_save = move |_| {
        let current = current_for_save.clone();
        async move {
            let avatar_url = match check_avatar_choice(&selected(), current.as_deref()) {
                Ok(url) => url,
                Err(message) => {
                    alert.set(Some(message));
                    return;
                }
            };

            saving.set(true);
            match api::update_avatar(avatar_url).await {
                Ok(user) => {
                    auth.set(AuthState::signed_in(user));
                    alert.set(Some(AlertMessage::success("Sucesso!", "Avatar atualizado com sucesso!")));
                }
                Err(e) => {
                    tracing::error!("Avatar update failed: {}", e);
                    alert.set(Some(AlertMessage::error(
                        "Erro",
                        error_text(&e, "Erro ao atualizar avatar. Tente novamente."),
                    )));
                }
            }
            saving.set(false);
        }
    };

    rsx! {
        article {
            class: "card settings-section",
            h2 { "Avatar" }
            div {
                class: "avatar-picker",
                img { class: "avatar avatar--large", src: "{preview}", alt: "Avatar selecionado" }
                div {
                    class: "avatar-grid",
                    for avatar in AVATARS {
                        button {
                            key: "{avatar}",
                            r#type: "button",
                            class: if selected() == avatar { "avatar-option selected" } else { "avatar-option" },
                            onclick: move |_| selected.set(avatar.to_string()),
                            img { class: "avatar", src: "{avatar}", alt: "Avatar" }
                        }
                    }
                }
            }
            div {
                class: "form-actions",
                if changed {
                    button {
                        class: "secondary",
                        r#type: "button",
                        onclick: move |_| selected.set(current.clone().unwrap_or_default()),
                        "Desfazer"
                    }
                }
                button {
                    class: "primary",
                    r#type: "button",
                    disabled: saving(),
                    onclick: handle_save,
                    if saving() { "Salvando..." } else { "Atualizar Avatar" }
                }
            }
        }
    }
}
