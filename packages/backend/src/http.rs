//! # HTTP implementation of [`Backend`]
//!
//! [`HttpBackend`] wraps a shared [`reqwest::Client`] and the backend base URL.
//! Each method builds one request and goes through [`HttpBackend::send`], which
//! turns transport failures into [`BackendError::Transport`] and non-success
//! statuses into [`BackendError::Status`] carrying the normalised backend
//! message (or an endpoint-specific fallback).

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::Backend;
use crate::error::{message_or, BackendError};
use crate::models::{
    AccountInfo, ArtistNameUpdate, AvatarUpdate, BioUpdate, Credentials, LinkUpdate,
    LoginResponse, PixRequest, PixResponse, ProfileUpdate, PublicProfile, RegisterRequest,
    SavePixRequest, SocialLink,
};

/// Backend reached over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a backend client; `timeout` bounds each request end to end.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/users/public-profile/{user_id}`, with the id escaped as a single path segment.
    fn profile_url(&self, user_id: &str) -> Result<Url, BackendError> {
        let user_id = user_id.trim();
        if matches!(user_id, "" | "." | "..") {
            return Err(BackendError::Invalid("Perfil não encontrado".to_string()));
        }

        let mut url = Url::parse(&self.url("/users/public-profile"))
            .map_err(|e| BackendError::Transport(format!("invalid backend URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| BackendError::Transport(format!("invalid backend URL: {}", self.base_url)))?
            .push(user_id);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<Response, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = message_or(&body, fallback);
        tracing::debug!(status = status.as_u16(), %message, "Backend rejected request");
        Err(BackendError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn patch<B: serde::Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
        fallback: &str,
    ) -> Result<(), BackendError> {
        tracing::debug!(path, "PATCH");
        let request = self.client.patch(self.url(path)).bearer_auth(token).json(body);
        self.send(request, fallback).await.map(|_| ())
    }
}

impl Backend for HttpBackend {
    async fn register(&self, request: &RegisterRequest) -> Result<(), BackendError> {
        tracing::debug!("POST /users/register");
        let request = self.client.post(self.url("/users/register")).json(request);
        self.send(request, "Erro ao cadastrar usuário").await.map(|_| ())
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, BackendError> {
        tracing::debug!("POST /users/login");
        let request = self.client.post(self.url("/users/login")).json(credentials);
        let response = self.send(request, "Credenciais inválidas").await?;
        Self::json(response).await
    }

    async fn account_info(&self, token: &str) -> Result<AccountInfo, BackendError> {
        tracing::debug!("GET /users/all-info");
        let request = self.client.get(self.url("/users/all-info")).bearer_auth(token);
        let response = self.send(request, "Erro ao buscar dados do usuário").await?;
        Self::json(response).await
    }

    async fn public_profile(&self, user_id: &str) -> Result<PublicProfile, BackendError> {
        tracing::debug!(user_id, "GET /users/public-profile");
        let url = self.profile_url(user_id)?;
        let response = self
            .send(self.client.get(url), "Erro ao carregar perfil")
            .await?;
        let profile: Option<PublicProfile> = Self::json(response).await?;
        Ok(profile.unwrap_or_default())
    }

    async fn pix_payload(&self, request: &PixRequest) -> Result<PixResponse, BackendError> {
        tracing::debug!(user_id = %request.user_id, "POST /pix/generate");
        let request = self.client.post(self.url("/pix/generate")).json(request);
        let response = self.send(request, "Erro ao buscar PIX").await?;
        Self::json(response).await
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<(), BackendError> {
        self.patch("/users/profile", token, update, "Erro ao atualizar perfil")
            .await
    }

    async fn update_artist_name(
        &self,
        token: &str,
        update: &ArtistNameUpdate,
    ) -> Result<(), BackendError> {
        self.patch("/users/artist-name", token, update, "Erro ao atualizar nome artístico")
            .await
    }

    async fn update_bio(&self, token: &str, update: &BioUpdate) -> Result<(), BackendError> {
        self.patch("/users/bio", token, update, "Erro ao atualizar bio")
            .await
    }

    async fn update_avatar(&self, token: &str, update: &AvatarUpdate) -> Result<(), BackendError> {
        self.patch("/users/update-avatar", token, update, "Erro ao atualizar avatar")
            .await
    }

    async fn update_link(
        &self,
        token: &str,
        link: SocialLink,
        update: &LinkUpdate,
    ) -> Result<(), BackendError> {
        let path = format!("/users/link/{}", link.slot());
        let fallback = format!("Erro ao atualizar {}", link.label());
        self.patch(&path, token, update, &fallback).await
    }

    async fn save_pix(&self, token: &str, request: &SavePixRequest) -> Result<(), BackendError> {
        tracing::debug!("POST /pix/save-pix");
        let request = self
            .client
            .post(self.url("/pix/save-pix"))
            .bearer_auth(token)
            .json(request);
        self.send(request, "Erro ao salvar chave PIX").await.map(|_| ())
    }

    async fn delete_account(&self, token: &str, credentials: &Credentials) -> Result<(), BackendError> {
        tracing::debug!("DELETE /users/delete-user");
        let request = self
            .client
            .delete(self.url("/users/delete-user"))
            .bearer_auth(token)
            .json(credentials);
        self.send(request, "Erro ao excluir conta").await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::body::Bytes;
    use axum::extract::State;
    use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
    use axum::response::IntoResponse;
    use axum::Router;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Seen {
        method: String,
        path: String,
        bearer: Option<String>,
        body: Value,
    }

    /// Local stand-in for the backend: records every request, answers with a canned reply.
    #[derive(Clone)]
    struct Stub {
        seen: Arc<Mutex<Vec<Seen>>>,
        reply: Arc<Mutex<(u16, String)>>,
    }

    impl Stub {
        fn reply(&self, status: u16, body: &str) {
            *self.reply.lock().unwrap() = (status, body.to_string());
        }

        fn seen(&self) -> Vec<Seen> {
            self.seen.lock().unwrap().clone()
        }
    }

    async fn record(
        State(stub): State<Stub>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> axum::response::Response {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string);
        stub.seen.lock().unwrap().push(Seen {
            method: method.to_string(),
            path: uri.path_and_query().map(|p| p.to_string()).unwrap_or_default(),
            bearer,
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        });

        let (status, body) = stub.reply.lock().unwrap().clone();
        (
            StatusCode::from_u16(status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }

    async fn serve() -> (HttpBackend, Stub) {
        let stub = Stub {
            seen: Arc::default(),
            reply: Arc::new(Mutex::new((200, "{}".to_string()))),
        };
        let app = Router::new().fallback(record).with_state(stub.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder().no_proxy().build().unwrap();
        (HttpBackend::with_client(client, format!("http://{}/", addr)), stub)
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("https://tipme.example.com/", None).unwrap();
        assert_eq!(backend.base_url(), "https://tipme.example.com");
        assert_eq!(backend.url("/users/login"), "https://tipme.example.com/users/login");
    }

    #[test]
    fn test_profile_id_is_a_single_segment() {
        let backend = HttpBackend::new("https://tipme.example.com", None).unwrap();
        assert_eq!(
            backend.profile_url("42").unwrap().as_str(),
            "https://tipme.example.com/users/public-profile/42"
        );
        assert_eq!(
            backend.profile_url("../all-info").unwrap().as_str(),
            "https://tipme.example.com/users/public-profile/..%2Fall-info"
        );
        assert_eq!(
            backend.profile_url("1?admin=true").unwrap().as_str(),
            "https://tipme.example.com/users/public-profile/1%3Fadmin=true"
        );
        assert!(matches!(backend.profile_url(".."), Err(BackendError::Invalid(_))));
        assert!(matches!(backend.profile_url(" "), Err(BackendError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let (backend, stub) = serve().await;
        stub.reply(200, r#"{"token":{"token":"h.p.s","user":{"userId":7}}}"#);

        let response = backend
            .login(&Credentials::new("mel@tipme.dev", "segredo123"))
            .await
            .unwrap();
        assert_eq!(response.bearer(), Some("h.p.s"));
        assert_eq!(response.user_id(), Some("7"));

        assert_eq!(
            stub.seen(),
            vec![Seen {
                method: "POST".into(),
                path: "/users/login".into(),
                bearer: None,
                body: json!({ "userMail": "mel@tipme.dev", "userPassword": "segredo123" }),
            }]
        );
    }

    #[tokio::test]
    async fn test_authenticated_calls_send_the_bearer_token() {
        let (backend, stub) = serve().await;

        backend.account_info("tok").await.unwrap();
        backend
            .update_link(
                "tok",
                SocialLink::Spotify,
                &LinkUpdate {
                    link: "https://open.spotify.com/artist/mel".into(),
                },
            )
            .await
            .unwrap();
        backend
            .save_pix(
                "tok",
                &SavePixRequest {
                    pix_key: "mel@tipme.dev".into(),
                    pix_name: "Mel Souza".into(),
                    pix_city: "Recife".into(),
                },
            )
            .await
            .unwrap();
        backend
            .delete_account("tok", &Credentials::new("mel@tipme.dev", "segredo123"))
            .await
            .unwrap();

        let seen = stub.seen();
        let calls: Vec<(&str, &str)> = seen
            .iter()
            .map(|s| (s.method.as_str(), s.path.as_str()))
            .collect();
        assert_eq!(
            calls,
            vec![
                ("GET", "/users/all-info"),
                ("PATCH", "/users/link/2"),
                ("POST", "/pix/save-pix"),
                ("DELETE", "/users/delete-user"),
            ]
        );
        assert!(seen.iter().all(|s| s.bearer.as_deref() == Some("tok")));
        assert_eq!(seen[1].body, json!({ "link": "https://open.spotify.com/artist/mel" }));
        assert_eq!(
            seen[2].body,
            json!({ "pixKey": "mel@tipme.dev", "pixName": "Mel Souza", "pixCity": "Recife" })
        );
        assert_eq!(
            seen[3].body,
            json!({ "userMail": "mel@tipme.dev", "userPassword": "segredo123" })
        );
    }

    #[tokio::test]
    async fn test_error_bodies_become_status_errors() {
        let (backend, stub) = serve().await;
        let request = RegisterRequest {
            user_name: "mel".into(),
            user_mail: "mel".into(),
            user_password: "123".into(),
        };

        stub.reply(
            400,
            r#"{"message":["userMail must be an email","userPassword is too short"],"error":"Bad Request"}"#,
        );
        assert_eq!(
            backend.register(&request).await,
            Err(BackendError::Status {
                status: 400,
                message: "userMail must be an email. userPassword is too short".into(),
            })
        );

        stub.reply(401, r#"{"error":{"message":"Token expirado"}}"#);
        assert_eq!(
            backend.account_info("tok").await,
            Err(BackendError::Status {
                status: 401,
                message: "Token expirado".into(),
            })
        );

        stub.reply(502, "<html>Bad Gateway</html>");
        assert_eq!(
            backend.register(&request).await,
            Err(BackendError::Status {
                status: 502,
                message: "Erro ao cadastrar usuário".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_empty_profile_bodies_are_not_configured() {
        let (backend, stub) = serve().await;

        stub.reply(200, "{}");
        let profile = backend.public_profile("7").await.unwrap();
        assert!(!profile.is_configured());

        stub.reply(200, "null");
        assert_eq!(backend.public_profile("7").await.unwrap(), PublicProfile::default());

        stub.reply(200, "{}");
        backend.public_profile("../all-info").await.unwrap();
        backend.public_profile("1?admin=true").await.unwrap();

        let paths: Vec<String> = stub.seen().into_iter().map(|s| s.path).collect();
        assert_eq!(
            paths,
            vec![
                "/users/public-profile/7",
                "/users/public-profile/7",
                "/users/public-profile/..%2Fall-info",
                "/users/public-profile/1%3Fadmin=true",
            ]
        );
    }
}
