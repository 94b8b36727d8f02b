//! Floating alerts that close themselves.

use dioxus::core::Task;
use dioxus::prelude::*;

use crate::icons::{FaCircleCheck, FaCircleExclamation, FaTriangleExclamation};
use crate::timer::{sleep, ALERT_AUTO_CLOSE};
use crate::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Warning,
    Error,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            AlertKind::Success => "alert--success",
            AlertKind::Warning => "alert--warning",
            AlertKind::Error => "alert--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AlertMessage {
    pub title: String,
    pub message: String,
    pub kind: AlertKind,
}

impl AlertMessage {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AlertKind::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, title, message)
    }

    fn new(kind: AlertKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
        }
    }
}

/// Message a server function failed with, or `fallback` when it carries none.
///
/// Only `ServerError` carries text meant for the user; transport and
/// decoding failures get the fallback.
pub fn error_text(error: &ServerFnError, fallback: &str) -> String {
    match error {
        ServerFnError::ServerError { message, .. } if !message.trim().is_empty() => {
            message.trim().to_string()
        }
        _ => fallback.to_string(),
    }
}

/// Shows the alert held in `alert` and clears it after a few seconds.
///
/// Setting a new alert restarts the countdown.
#[component]
pub fn AlertHost(alert: Signal<Option<AlertMessage>>) -> Element {
    let mut alert = alert;
    let mut timer = use_signal(|| None::<Task>);

    use_effect(move || {
        let shown = alert.read().is_some();
        if let Some(task) = timer.write().take() {
            task.cancel();
        }
        if shown {
            timer.set(Some(spawn(async move {
                sleep(ALERT_AUTO_CLOSE).await;
                alert.set(None);
            })));
        }
    });

    let Some(current) = alert() else {
        return rsx! {};
    };

    let class = current.kind.class();

    rsx! {
        div {
            class: "alert {class}",
            role: "alert",
            onclick: move |_| alert.set(None),
            match current.kind {
                AlertKind::Success => rsx! { Icon { icon: FaCircleCheck, width: 18, height: 18 } },
                AlertKind::Warning => rsx! { Icon { icon: FaTriangleExclamation, width: 18, height: 18 } },
                AlertKind::Error => rsx! { Icon { icon: FaCircleExclamation, width: 18, height: 18 } },
            }
            div {
                p { class: "alert-title", "{current.title}" }
                p { class: "alert-message", "{current.message}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_text_is_the_server_message() {
        let error = ServerFnError::new("Este artista ainda não cadastrou uma chave PIX");
        assert_eq!(
            error_text(&error, "Erro ao buscar PIX"),
            "Este artista ainda não cadastrou uma chave PIX"
        );
        assert_eq!(error_text(&ServerFnError::new("Email: inválido"), "x"), "Email: inválido");
    }

    #[test]
    fn test_unauthenticated_text_survives_the_round_trip() {
        let expected = backend::BackendError::Unauthenticated.to_string();
        let error = ServerFnError::new(expected.clone());
        assert_eq!(error_text(&error, "Erro ao salvar"), expected);
    }

    #[test]
    fn test_blank_message_uses_fallback() {
        assert_eq!(
            error_text(&ServerFnError::new("  "), "Erro ao buscar PIX"),
            "Erro ao buscar PIX"
        );
    }
}
