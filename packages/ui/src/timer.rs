use std::time::Duration;

/// How long an alert stays on screen.
pub const ALERT_AUTO_CLOSE: Duration = Duration::from_secs(3);

/// How long the "copied" indicator stays on after a clipboard copy.
pub const COPIED_RESET: Duration = Duration::from_secs(2);

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
