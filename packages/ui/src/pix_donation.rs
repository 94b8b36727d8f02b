//! Donation button and PIX modal for an artist's public profile.

use backend::donation::{format_brl, parse_amount};
use dioxus::prelude::*;

use crate::alert::error_text;
use crate::icons::{FaCopy, FaHandHoldingDollar, FaQrcode};
use crate::timer::{sleep, COPIED_RESET};
use crate::views::ModalOverlay;
use crate::Icon;

#[component]
pub fn PixDonation(user_id: String, artist_name: Option<String>) -> Element {
    let mut open = use_signal(|| false);
    let mut amount_input = use_signal(String::new);
    let mut amount = use_signal(|| 0.0_f64);
    let mut pix_key = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);
    let mut copied = use_signal(|| false);

    let mut close = move || {
        open.set(false);
        pix_key.set(None);
        amount_input.set(String::new());
        amount.set(0.0);
        error.set(None);
        copied.set(false);
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let user_id = user_id.clone();
        spawn(async move {
            let value = match parse_amount(&amount_input()) {
                Ok(value) => value,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            loading.set(true);
            error.set(None);
            pix_key.set(None);

            match api::request_pix(user_id, value).await {
                Ok(key) => {
                    amount.set(value);
                    pix_key.set(Some(key));
                }
                Err(e) => {
                    tracing::error!("Failed to fetch PIX payload: {}", e);
                    error.set(Some(error_text(&e, "Erro ao buscar PIX")));
                }
            }
            loading.set(false);
        });
    };

    let handle_copy = move |_| {
        let Some(key) = pix_key() else {
            return;
        };
        spawn(async move {
            if copy_to_clipboard(&key).await {
                copied.set(true);
                sleep(COPIED_RESET).await;
                copied.set(false);
            }
        });
    };

    let recipient = artist_name.clone().unwrap_or_else(|| "o artista".to_string());
    let formatted = format_brl(amount());
    let amount_is_valid = parse_amount(&amount_input()).is_ok();

    rsx! {
        div {
            class: "donate",
            button {
                class: "primary donate-btn",
                onclick: move |_| open.set(true),
                Icon { icon: FaHandHoldingDollar, width: 16, height: 16 }
                span { "Doar" }
            }
        }

        if open() {
            ModalOverlay {
                title: "Doar via PIX",
                on_close: move |_| close(),

                match pix_key() {
                    None => rsx! {
                        form {
                            class: "form-stack",
                            onsubmit: handle_submit,
                            label { r#for: "donation-amount", "Valor da doação (R$)" }
                            input {
                                id: "donation-amount",
                                r#type: "text",
                                inputmode: "decimal",
                                placeholder: "Digite o valor",
                                disabled: loading(),
                                value: amount_input(),
                                oninput: move |evt| {
                                    amount_input.set(evt.value());
                                    error.set(None);
                                },
                            }
                            if let Some(err) = error() {
                                div { class: "form-error", "{err}" }
                            }
                            button {
                                class: "primary",
                                r#type: "submit",
                                disabled: loading() || !amount_is_valid,
                                if loading() { "Buscando PIX..." } else { "Gerar PIX" }
                            }
                        }
                    },
                    Some(key) => rsx! {
                        div {
                            class: "donation-summary",
                            p { class: "muted", "Valor da doação para" }
                            p { class: "donation-recipient", "{recipient}" }
                            p { class: "donation-amount", "{formatted}" }
                        }
                        label {
                            class: "pix-label",
                            Icon { icon: FaQrcode, width: 16, height: 16 }
                            span { "Chave PIX" }
                        }
                        div {
                            class: "pix-copy",
                            input { readonly: true, value: "{key}" }
                            button {
                                class: "primary",
                                onclick: handle_copy,
                                Icon { icon: FaCopy, width: 14, height: 14 }
                                span { if copied() { "Copiado!" } else { "Copiar" } }
                            }
                        }
                        div {
                            class: "donation-steps",
                            h4 { "Como doar:" }
                            ol {
                                li { "Copie a chave PIX" }
                                li { "Abra seu app bancário" }
                                li { "Faça um PIX com o valor de {formatted}" }
                                li { "Cole a chave PIX copiada" }
                                li { "Confirme a transferência" }
                            }
                        }
                    },
                }

                button {
                    class: "secondary wide",
                    onclick: move |_| close(),
                    if pix_key().is_some() { "Entendi!" } else { "Cancelar" }
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn copy_to_clipboard(text: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let clipboard = window.navigator().clipboard();
    match wasm_bindgen_futures::JsFuture::from(clipboard.write_text(text)).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("Failed to copy PIX key: {:?}", e);
            false
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn copy_to_clipboard(_text: &str) -> bool {
    false
}
