//! Backend client using the OnceCell pattern.

use backend::HttpBackend;
use tokio::sync::OnceCell;

use crate::config::Settings;

static BACKEND: OnceCell<HttpBackend> = OnceCell::const_new();

/// Get or initialize the backend client.
/// Uses `backend.url` and `backend.timeout` from the settings.
pub async fn get_backend() -> anyhow::Result<&'static HttpBackend> {
    BACKEND
        .get_or_try_init(|| async {
            let settings = Settings::load()?;
            tracing::info!(url = %settings.backend.url, "Using TipMe backend");
            let timeout = settings.backend.timeout();
            let backend = HttpBackend::new(settings.backend.url, timeout)?;
            Ok(backend)
        })
        .await
}
