use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::types::{AuthPayload, Envelope, LoginRequest, NewTodo, RegisterRequest, Todo, TodoUpdate, User, ValidationBody};

/// Typed access to the todo API.
///
/// # Example
/// ```rust,no_run
/// use client::{ApiClient, Session};
/// use std::sync::Arc;
///
/// # async fn run() -> client::ClientResult<()> {
/// let api = ApiClient::new("http://127.0.0.1:8080", Arc::new(Session::in_memory()))?;
/// api.login("user@example.com", "password123").await?;
/// for todo in api.list_todos().await? {
///     println!("{} {}", todo.id, todo.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<Session>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_http(http, base_url, session))
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>, session: Arc<Session>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, session }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Single composition point for every call: attaches the bearer token,
    /// clears the session on 401 and maps error statuses.
    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method.clone(), &url).header("Accept", "application/json");
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        debug!(%method, path, status = status.as_u16(), "api call");
        let bytes = resp.bytes().await?;

        match status {
            s if s.is_success() => {
                serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
            }
            StatusCode::UNAUTHORIZED => {
                warn!(path, "token rejected; clearing session");
                if let Err(e) = self.session.clear() {
                    warn!(error = %e, "could not clear stored token");
                }
                Err(ClientError::Unauthenticated)
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                let body: ValidationBody =
                    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))?;
                Err(ClientError::Validation { message: body.message, errors: body.errors })
            }
            other => Err(ClientError::Http {
                status: other.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }),
        }
    }

    fn data<T>(env: Envelope<T>) -> ClientResult<T> {
        if !env.is_success() {
            return Err(ClientError::NotFound(env.message.unwrap_or_default()));
        }
        env.data.ok_or_else(|| ClientError::Decode("envelope without data".into()))
    }

    fn message(env: Envelope<()>) -> ClientResult<String> {
        let message = env.message.clone().unwrap_or_default();
        if env.is_success() { Ok(message) } else { Err(ClientError::NotFound(message)) }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> ClientResult<User> {
        let body = RegisterRequest { name, email, password };
        let env: Envelope<AuthPayload> = self.send(Method::POST, "/register", Some(&body)).await?;
        let payload = Self::data(env)?;
        self.session.set(&payload.token)?;
        Ok(payload.user)
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let body = LoginRequest { email, password };
        let env: Envelope<AuthPayload> = self.send(Method::POST, "/login", Some(&body)).await?;
        let payload = Self::data(env)?;
        self.session.set(&payload.token)?;
        Ok(payload.user)
    }

    pub async fn me(&self) -> ClientResult<User> {
        let env: Envelope<User> = self.send::<(), _>(Method::GET, "/me", None).await?;
        Self::data(env)
    }

    /// Revokes the token server-side; the local session is cleared whatever
    /// the server answers.
    pub async fn logout(&self) -> ClientResult<String> {
        let result = self.send::<(), Envelope<()>>(Method::POST, "/logout", None).await;
        self.session.clear()?;
        Self::message(result?)
    }

    pub async fn list_todos(&self) -> ClientResult<Vec<Todo>> {
        let env: Envelope<Vec<Todo>> = self.send::<(), _>(Method::GET, "/todos", None).await?;
        Self::data(env)
    }

    pub async fn get_todo(&self, id: i32) -> ClientResult<Todo> {
        let env: Envelope<Todo> = self.send::<(), _>(Method::GET, &format!("/todos/{id}"), None).await?;
        Self::data(env)
    }

    pub async fn create_todo(&self, todo: &NewTodo) -> ClientResult<Todo> {
        let env: Envelope<Todo> = self.send(Method::POST, "/todos", Some(todo)).await?;
        Self::data(env)
    }

    pub async fn update_todo(&self, id: i32, update: &TodoUpdate) -> ClientResult<Todo> {
        let env: Envelope<Todo> = self.send(Method::PUT, &format!("/todos/{id}"), Some(update)).await?;
        Self::data(env)
    }

    pub async fn delete_todo(&self, id: i32) -> ClientResult<String> {
        let env: Envelope<()> = self.send::<(), _>(Method::DELETE, &format!("/todos/{id}"), None).await?;
        Self::message(env)
    }
}
