//! Test helpers for integration tests
//!
//! Spawns a server per test and wraps the request shapes the API expects:
//! bearer tokens, admin basic auth, and the refresh-token cookie.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use blog_api::{create_app, create_app_state_with, serve};
use blog_common::AppConfig;
use blog_service::RecordingMailer;
use reqwest::header::{COOKIE, SET_COOKIE, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{AccessToken, LoginRequest, RegisterRequest};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-that-is-long-enough";
pub const ADMIN_LOGIN: &str = "admin";
pub const ADMIN_PASSWORD: &str = "qwerty";
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub mailer: RecordingMailer,
    _handle: JoinHandle<()>,
}

/// A logged-in user as the API sees it
#[derive(Debug, Clone)]
pub struct Session {
    pub login: String,
    pub email: String,
    pub password: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestServer {
    /// Start a server on in-memory storage
    pub async fn start() -> Result<Self> {
        Self::start_with_config(AppConfig::in_memory(TEST_JWT_SECRET)).await
    }

    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let mailer = RecordingMailer::new();
        let state = create_app_state_with(config, Arc::new(mailer.clone())).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            mailer,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request builder for `path` with nothing attached
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url(), path))
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .request(Method::GET, path)
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::POST, path).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(Method::POST, path)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(Method::PUT, path)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .request(Method::DELETE, path)
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Admin request carrying basic credentials
    pub fn admin(&self, method: Method, path: &str) -> RequestBuilder {
        self.request(method, path)
            .basic_auth(ADMIN_LOGIN, Some(ADMIN_PASSWORD))
    }

    /// Request carrying `token` as the refresh cookie
    pub fn with_cookie(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.request(method, path)
            .header(COOKIE, format!("{REFRESH_COOKIE}={token}"))
    }

    /// Register, confirm by the mailed code, and log in
    pub async fn register_and_login(&self, request: &RegisterRequest) -> Result<Session> {
        let response = self.post("/auth/registration", request).await?;
        assert_status(response, StatusCode::NO_CONTENT).await?;

        let code = self
            .mailer
            .last_to(&request.email)
            .and_then(|mail| mail.code().map(str::to_string))
            .context("no confirmation code was mailed")?;
        let response = self
            .post(
                "/auth/registration-confirmation",
                &serde_json::json!({ "code": code }),
            )
            .await?;
        assert_status(response, StatusCode::NO_CONTENT).await?;

        self.login(request, "integration-tests").await
    }

    /// Log in from a device identified by `user_agent`
    pub async fn login(&self, request: &RegisterRequest, user_agent: &str) -> Result<Session> {
        let response = self
            .request(Method::POST, "/auth/login")
            .header(USER_AGENT, user_agent)
            .json(&LoginRequest::from_register(request))
            .send()
            .await?;
        let refresh_token = refresh_cookie(&response).context("login set no refresh cookie")?;
        let body: AccessToken = assert_json(response, StatusCode::OK).await?;

        Ok(Session {
            login: request.login.clone(),
            email: request.email.clone(),
            password: request.password.clone(),
            access_token: body.access_token,
            refresh_token,
        })
    }
}

/// Value of the refresh-token cookie set by `response`, if any
pub fn refresh_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let pair = cookie.split(';').next()?.trim();
            pair.strip_prefix(REFRESH_COOKIE)?
                .strip_prefix('=')
                .map(str::to_string)
        })
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
