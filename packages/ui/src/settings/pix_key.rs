use dioxus::prelude::*;

use super::SettingsDraft;
use crate::icons::FaKey;
use crate::Icon;

/// Where donations land. Saved only when key, name and city are all filled.
#[component]
pub fn PixKeyForm(draft: Signal<SettingsDraft>) -> Element {
    let mut draft = draft;
    let (filled, total) = {
        let d = draft.read();
        let values = [&d.pix_key, &d.pix_name, &d.pix_city];
        (values.iter().filter(|v| !v.trim().is_empty()).count(), values.len())
    };

    rsx! {
        article {
            class: "card settings-section",
            h2 {
                Icon { icon: FaKey, width: 16, height: 16 }
                span { "Chave PIX" }
            }
            p { class: "muted", "Os fãs farão doações para esta chave" }

            div {
                class: "form-grid",
                div {
                    class: "form-field",
                    label { r#for: "settings-pix-key", "Chave" }
                    input {
                        id: "settings-pix-key",
                        r#type: "text",
                        placeholder: "CPF, email, telefone ou chave aleatória",
                        value: draft.read().pix_key.clone(),
                        oninput: move |evt| draft.write().pix_key = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "settings-pix-name", "Nome completo" }
                    input {
                        id: "settings-pix-name",
                        r#type: "text",
                        placeholder: "Nome do titular da conta",
                        value: draft.read().pix_name.clone(),
                        oninput: move |evt| draft.write().pix_name = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "settings-pix-city", "Cidade" }
                    input {
                        id: "settings-pix-city",
                        r#type: "text",
                        placeholder: "Cidade do titular",
                        value: draft.read().pix_city.clone(),
                        oninput: move |evt| draft.write().pix_city = evt.value(),
                    }
                }
            }

            if filled > 0 && filled < total {
                p { class: "form-help form-help--warning", "Preencha chave, nome e cidade para salvar a chave PIX." }
            }
        }
    }
}
