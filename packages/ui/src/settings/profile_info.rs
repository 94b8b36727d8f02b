use backend::settings::BIO_MAX_CHARS;
use dioxus::prelude::*;

use super::SettingsDraft;
use crate::icons::{FaFileLines, FaMicrophone, FaUser};
use crate::Icon;

/// Artist name, username and bio: what appears on the public profile.
#[component]
pub fn ProfileInfoForm(draft: Signal<SettingsDraft>) -> Element {
    let mut draft = draft;
    let bio_len = draft.read().bio.chars().count();

    rsx! {
        article {
            class: "card settings-section",
            h2 {
                Icon { icon: FaUser, width: 16, height: 16 }
                span { "Informações do Perfil" }
            }
            p { class: "muted", "Dados que aparecerão no seu perfil público" }

            div {
                class: "form-grid",
                div {
                    class: "form-field",
                    label {
                        r#for: "settings-artist-name",
                        Icon { icon: FaMicrophone, width: 12, height: 12 }
                        "Nome Artístico"
                    }
                    input {
                        id: "settings-artist-name",
                        r#type: "text",
                        placeholder: "Digite seu nome artístico",
                        value: draft.read().artist_name.clone(),
                        oninput: move |evt| draft.write().artist_name = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    label {
                        r#for: "settings-user-name",
                        Icon { icon: FaUser, width: 12, height: 12 }
                        "Nome de Usuário"
                    }
                    input {
                        id: "settings-user-name",
                        r#type: "text",
                        placeholder: "Digite seu nome de usuário",
                        value: draft.read().user_name.clone(),
                        oninput: move |evt| draft.write().user_name = evt.value(),
                    }
                }
            }

            div {
                class: "form-field",
                label {
                    r#for: "settings-bio",
                    Icon { icon: FaFileLines, width: 12, height: 12 }
                    "Bio"
                }
                textarea {
                    id: "settings-bio",
                    rows: 3,
                    maxlength: BIO_MAX_CHARS as i64,
                    placeholder: "Conte um pouco sobre você...",
                    value: draft.read().bio.clone(),
                    oninput: move |evt| draft.write().bio = evt.value(),
                }
                p {
                    class: if bio_len > BIO_MAX_CHARS { "form-help form-help--error" } else { "form-help" },
                    "{bio_len}/{BIO_MAX_CHARS} caracteres"
                }
            }
        }
    }
}
