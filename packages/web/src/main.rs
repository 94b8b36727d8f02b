use dioxus::prelude::*;

use ui::AuthProvider;
use views::{Home, Landing, Profile, Register, Settings};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Landing {},
    #[route("/cadastro")]
    Register {},
    #[route("/home")]
    Home {},
    #[route("/profile/:user_id")]
    Profile { user_id: String },
    #[route("/settings")]
    Settings {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish();
        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Failed to install tracing subscriber: {e}");
        }

        let result = tokio::runtime::Runtime::new()
            .map_err(anyhow::Error::from)
            .and_then(|runtime| runtime.block_on(launch_server()));
        if let Err(e) = result {
            tracing::error!("Server stopped: {:#}", e);
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() -> anyhow::Result<()> {
    use anyhow::Context;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::{time, Key, SameSite};
    use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

    let settings = api::config::Settings::load()?;

    // Build the backend client up front.
    api::remote::get_backend().await?;

    let key = Key::try_from(settings.session.secret.as_bytes())
        .context("SESSION_SECRET cannot be used as a signing key")?;
    let ttl = time::Duration::try_from(settings.session.ttl()).context("SESSION_TTL is too large")?;

    // Sessions hold the bearer token and the cached user.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_signed(key)
        .with_secure(settings.session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(ttl));

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::TIPME_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}
