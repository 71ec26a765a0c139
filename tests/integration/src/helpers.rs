//! Test helpers for integration tests
//!
//! Provides a test server on an ephemeral port and a cookie-keeping
//! browser that never follows redirects.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use club_api::{create_app, create_app_state, serve, AppState};
use club_common::AppConfig;
use club_core::UserId;
use reqwest::{header, redirect, Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server backed by a fresh in-memory store
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state.clone())?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A new browser with an empty cookie jar
    pub fn browser(&self) -> Result<Browser> {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Browser {
            base_url: self.base_url(),
            client,
        })
    }
}

/// One visitor: keeps its own session cookie between requests
pub struct Browser {
    base_url: String,
    client: Client,
}

impl Browser {
    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request without a body
    pub async fn post(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.post(&url).send().await?)
    }

    /// Make a POST request with a url-encoded form body
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.post(&url).form(form).send().await?)
    }

    /// Sign up with generated details and return the new user's id
    pub async fn sign_up(&self, username: &str) -> Result<UserId> {
        let form = crate::fixtures::sign_up_form(username);
        let response = self.post_form("/sign_up/", &form.as_pairs()).await?;
        assert_redirect(response, "/").await?;
        self.current_user_id().await
    }

    /// Log in with the fixture password
    pub async fn log_in(&self, username: &str) -> Result<Response> {
        self.post_form(
            "/log_in/",
            &[
                ("username", username),
                ("password", crate::fixtures::PASSWORD),
            ],
        )
        .await
    }

    /// Id of the signed-in user, read from the profile page
    pub async fn current_user_id(&self) -> Result<UserId> {
        let page = assert_page(self.get("/profile/").await?, "profile.html").await?;
        let id = page.context["profile"]["user"]["id"]
            .as_i64()
            .context("profile page has no user id")?;
        Ok(UserId::new(id))
    }
}

/// Create a test configuration: in-memory storage and a generous rate limit
pub fn test_config() -> Result<AppConfig> {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("APP_ENV", "development"),
        ("STORAGE_BACKEND", "memory"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "0"),
        ("SESSION_SECRET", "integration-test-secret"),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "10000"),
    ]);

    AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// A rendered page as returned by the server
#[derive(Debug, Deserialize)]
pub struct PageBody {
    pub template: String,
    pub context: Value,
}

/// Assert a 302 to exactly `location`
pub async fn assert_redirect(response: Response, location: &str) -> Result<()> {
    let status = response.status();
    let actual = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if status != StatusCode::FOUND || actual.as_deref() != Some(location) {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected 302 to {}, got {} to {:?}. Body: {}",
            location,
            status,
            actual,
            body
        );
    }
    Ok(())
}

/// Assert a 200 page rendered with `template`
pub async fn assert_page(response: Response, template: &str) -> Result<PageBody> {
    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await?;
        anyhow::bail!("Expected status 200, got {}. Body: {}", status, body);
    }

    let page: PageBody = response.json().await?;
    if page.template != template {
        anyhow::bail!("Expected template {}, got {}", template, page.template);
    }
    Ok(page)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
