//! Settings page: avatar, public profile, social links, PIX key and account.

use api::{FieldReport, SessionUser};
use backend::BackendError;
use dioxus::prelude::*;

use crate::alert::{error_text, AlertHost, AlertMessage};
use crate::auth::{use_auth, AuthState};
use crate::icons::{FaArrowLeft, FaCircleCheck, FaCircleExclamation};
use crate::login_dialog::LoginDialog;
use crate::settings::{
    AccountForm, AvatarPicker, DeleteAccountForm, PixKeyForm, ProfileInfoForm, SettingsDraft,
    SocialLinksForm,
};
use crate::Icon;

/// Per-field progress of the last save.
#[derive(Clone, Debug, PartialEq)]
enum SaveState {
    Idle,
    Submitting,
    Done(Vec<FieldReport>),
}

/// Alert summarising a finished batch.
fn batch_alert(reports: &[FieldReport]) -> AlertMessage {
    match reports.iter().find(|r| !r.is_success()) {
        None => AlertMessage::success("Sucesso!", "Perfil atualizado com sucesso!"),
        Some(failed) => {
            let saved = reports.iter().filter(|r| r.is_success()).count();
            let error = failed.error.clone().unwrap_or_default();
            let message = format!("{}: {}", failed.field.label(), error);
            if saved > 0 {
                AlertMessage::warning("Alterações salvas parcialmente", message)
            } else {
                AlertMessage::error("Erro ao salvar", message)
            }
        }
    }
}

#[component]
pub fn SettingsView() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut draft = use_signal(SettingsDraft::default);
    let mut loaded_for = use_signal(|| None::<SessionUser>);
    let mut save_state = use_signal(|| SaveState::Idle);
    let mut alert = use_signal(|| None::<AlertMessage>);

    // Pre-fill once the session is known, and again after each successful refresh
    use_effect(move || {
        let user = auth().user;
        if let Some(user) = user {
            if loaded_for.peek().as_ref() != Some(&user) {
                let mut next = SettingsDraft::from_user(&user);
                let current = draft.peek();
                next.pix_key = current.pix_key.clone();
                next.pix_name = current.pix_name.clone();
                next.pix_city = current.pix_city.clone();
                drop(current);
                draft.set(next);
                loaded_for.set(Some(user));
            }
        }
    });

    let handle_save = move |_| async move {
        let Some(original) = auth().user else {
            return;
        };

        let update = draft.read().to_update(&original);
        if let Err(e) = update.validate() {
            alert.set(Some(AlertMessage::error("Erro", e.to_string())));
            return;
        }
        if update.is_empty() {
            alert.set(Some(AlertMessage::warning("Aviso", "Nenhuma alteração para salvar")));
            return;
        }

        save_state.set(SaveState::Submitting);
        match api::update_settings(update).await {
            Ok(reports) => {
                alert.set(Some(batch_alert(&reports)));
                save_state.set(SaveState::Done(reports));
                draft.write().clear_secrets();
                match api::get_session().await {
                    Ok(Some(user)) => auth.set(AuthState::signed_in(user)),
                    Ok(None) => auth.set(AuthState::signed_out()),
                    Err(e) => tracing::error!("Failed to refresh session: {}", e),
                }
            }
            Err(e) => {
                tracing::error!("Settings update failed: {}", e);
                let message = error_text(&e, "Erro ao salvar alterações");
                save_state.set(SaveState::Idle);
                if message == BackendError::Unauthenticated.to_string() {
                    // token expired while the page was open; the login dialog takes over
                    auth.set(AuthState::signed_out());
                }
                alert.set(Some(AlertMessage::error("Erro", message)));
            }
        }
    };

    let state = auth();
    if state.loading {
        return rsx! {
            div { class: "page page--centered", p { class: "muted", "Carregando..." } }
        };
    }
    if state.user.is_none() {
        return rsx! {
            div { class: "page" }
            LoginDialog {
                on_close: move |_| {
                    nav.replace("/home");
                },
                on_success: move |_| {},
            }
        };
    }

    let submitting = save_state() == SaveState::Submitting;

    rsx! {
        AlertHost { alert }

        div {
            class: "page settings-page",
            header {
                class: "topbar",
                Link {
                    class: "button secondary",
                    to: "/home",
                    Icon { icon: FaArrowLeft, width: 14, height: 14 }
                    span { "Voltar" }
                }
                h1 { "Configurações" }
            }

            AvatarPicker { alert }
            ProfileInfoForm { draft }
            SocialLinksForm { draft }
            PixKeyForm { draft }
            AccountForm { draft }

            div {
                class: "form-actions settings-save",
                button {
                    class: "primary",
                    disabled: submitting,
                    onclick: handle_save,
                    if submitting { "Salvando..." } else { "Salvar Alterações" }
                }
            }

            if let SaveState::Done(reports) = save_state() {
                ul {
                    class: "field-status",
                    for report in reports {
                        li {
                            key: "{report.field:?}",
                            class: if report.is_success() { "field-status--success" } else { "field-status--error" },
                            if report.is_success() {
                                Icon { icon: FaCircleCheck, width: 12, height: 12 }
                            } else {
                                Icon { icon: FaCircleExclamation, width: 12, height: 12 }
                            }
                            span { "{report.field.label()}" }
                            if let Some(error) = &report.error {
                                span { class: "muted", " {error}" }
                            }
                        }
                    }
                }
            }

            DeleteAccountForm { alert }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertKind;
    use api::{SettingsField, SocialLink};

    fn report(field: SettingsField, error: Option<&str>) -> FieldReport {
        FieldReport {
            field,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_all_saved_is_success() {
        let alert = batch_alert(&[report(SettingsField::Bio, None)]);
        assert_eq!(alert.kind, AlertKind::Success);
    }

    #[test]
    fn test_partial_failure_names_the_field() {
        let alert = batch_alert(&[
            report(SettingsField::Bio, None),
            report(SettingsField::Link(SocialLink::Spotify), Some("Link inválido")),
        ]);
        assert_eq!(alert.kind, AlertKind::Warning);
        assert_eq!(alert.message, "Spotify: Link inválido");
    }

    #[test]
    fn test_total_failure_is_error() {
        let alert = batch_alert(&[report(SettingsField::Pix, Some("Chave inválida"))]);
        assert_eq!(alert.kind, AlertKind::Error);
    }
}
