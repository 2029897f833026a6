// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP plumbing shared by every endpoint group.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use hares_common_http::RetryConfig;
use hares_common_storage::SharedStore;
use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::{ApiError, Result, DEFAULT_ERROR_MESSAGE};
use crate::session::Session;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// 401 from this endpoint means bad credentials, not an expired session.
pub(crate) const LOGIN_ENDPOINT: &str = "/auth/login";

#[derive(Debug, Clone)]
pub struct ClientConfig {
	pub request_timeout: Duration,
	/// Applied to GET requests only; writes are sent once.
	pub retry_config: RetryConfig,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			request_timeout: Duration::from_secs(30),
			retry_config: RetryConfig::default(),
		}
	}
}

pub struct ApiClientBuilder {
	base_url: String,
	store: Option<SharedStore>,
	config: ClientConfig,
}

impl ApiClientBuilder {
	pub fn new() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			store: None,
			config: ClientConfig::default(),
		}
	}

	/// Example: `https://api.hares.example`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();
		self
	}

	/// Store holding the `token` and `user` keys.
	pub fn store(mut self, store: SharedStore) -> Self {
		self.store = Some(store);
		self
	}

	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.config.request_timeout = timeout;
		self
	}

	pub fn retry_config(mut self, config: RetryConfig) -> Self {
		self.config.retry_config = config;
		self
	}

	pub fn build(self) -> Result<ApiClient> {
		let base_url = self.base_url.trim_end_matches('/').to_string();
		Url::parse(&base_url)?;

		let http_client = hares_common_http::builder()
			.timeout(self.config.request_timeout)
			.build()?;

		let store = self
			.store
			.unwrap_or_else(|| Arc::new(hares_common_storage::MemoryStore::new()));

		info!(base_url = %base_url, "API client initialized");

		Ok(ApiClient {
			inner: Arc::new(ApiClientInner {
				base_url,
				http_client,
				session: Session::new(store),
				config: self.config,
			}),
		})
	}
}

impl Default for ApiClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct ApiClientInner {
	base_url: String,
	http_client: Client,
	session: Session,
	config: ClientConfig,
}

/// Client for the back office REST API.
///
/// # Example
///
/// ```ignore
/// let api = ApiClient::builder()
///     .base_url("http://localhost:3001")
///     .store(store)
///     .build()?;
///
/// let customers = api.customers().list(PageRequest::default()).await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
	inner: Arc<ApiClientInner>,
}

impl ApiClient {
	pub fn builder() -> ApiClientBuilder {
		ApiClientBuilder::new()
	}

	pub fn base_url(&self) -> &str {
		&self.inner.base_url
	}

	pub fn session(&self) -> &Session {
		&self.inner.session
	}

	fn url_for(&self, endpoint: &str, query: &[(&str, String)], cache_bust: bool) -> Result<Url> {
		let mut url = Url::parse(&format!("{}{}", self.inner.base_url, endpoint))?;
		if !query.is_empty() || cache_bust {
			let mut pairs = url.query_pairs_mut();
			for (name, value) in query {
				pairs.append_pair(name, value);
			}
			if cache_bust {
				pairs.append_pair("_t", &Utc::now().timestamp_millis().to_string());
			}
		}
		Ok(url)
	}

	pub(crate) async fn get<T: DeserializeOwned>(
		&self,
		endpoint: &str,
		query: &[(&str, String)],
	) -> Result<T> {
		self.request(Method::GET, endpoint, query, None::<&()>).await
	}

	pub(crate) async fn send<T, B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<T>
	where
		T: DeserializeOwned,
		B: Serialize + ?Sized,
	{
		self.request(method, endpoint, &[], body).await
	}

	async fn request<T, B>(
		&self,
		method: Method,
		endpoint: &str,
		query: &[(&str, String)],
		body: Option<&B>,
	) -> Result<T>
	where
		T: DeserializeOwned,
		B: Serialize + ?Sized,
	{
		let is_get = method == Method::GET;
		let url = self.url_for(endpoint, query, is_get)?;
		let token = self.inner.session.token();
		let body = body.map(serde_json::to_vec).transpose()?;

		let retry_config = if is_get {
			self.inner.config.retry_config.clone()
		} else {
			RetryConfig::none()
		};

		debug!(%method, url = %url, "API request");

		let (method, url, endpoint) = (&method, &url, endpoint);
		let (token, body) = (token.as_deref(), body.as_deref());
		let result =
			hares_common_http::retry(&retry_config, move || self.execute(method, url, endpoint, token, body))
				.await;

		let value = match result {
			Ok(value) => value,
			Err(ApiError::Server { status, message }) => {
				error!(endpoint, status, message = %message, "API request failed");
				return Err(ApiError::Server { status, message });
			}
			Err(err) => return Err(err),
		};
		Ok(serde_json::from_value(value)?)
	}

	/// One attempt. Error statuses become [`ApiError`] here so the retry loop
	/// sees transient ones.
	async fn execute(
		&self,
		method: &Method,
		url: &Url,
		endpoint: &str,
		token: Option<&str>,
		body: Option<&[u8]>,
	) -> Result<Value> {
		let mut request = self
			.inner
			.http_client
			.request(method.clone(), url.clone())
			.header(header::CONTENT_TYPE, "application/json");
		if let Some(token) = token {
			request = request.bearer_auth(token);
		}
		if let Some(body) = body {
			request = request.body(body.to_vec());
		}

		let response = request.send().await?;
		let status = response.status();

		if status == StatusCode::UNAUTHORIZED && endpoint != LOGIN_ENDPOINT {
			warn!(endpoint, "session rejected, clearing auth data");
			self.inner.session.clear_auth_data();
			return Err(ApiError::Unauthorized);
		}

		if !status.is_success() {
			let message = response
				.json::<Value>()
				.await
				.ok()
				.and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
				.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
			return Err(ApiError::Server {
				status: status.as_u16(),
				message,
			});
		}

		if status == StatusCode::NO_CONTENT {
			return Ok(Value::Null);
		}

		let bytes = response.bytes().await?;
		if bytes.is_empty() {
			return Ok(Value::Null);
		}
		Ok(serde_json::from_slice(&bytes)?)
	}
}

impl std::fmt::Debug for ApiClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ApiClient")
			.field("base_url", &self.inner.base_url)
			.field("session", &self.inner.session)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::{Id, User};
	use hares_common_storage::MemoryStore;
	use serde_json::{json, Map};
	use wiremock::matchers::{body_json, header, method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn fast_retry() -> RetryConfig {
		RetryConfig {
			max_attempts: 3,
			base_delay: Duration::from_millis(1),
			max_delay: Duration::from_millis(2),
			backoff_factor: 2.0,
			jitter: false,
		}
	}

	fn client_for(server: &MockServer, store: Arc<MemoryStore>) -> ApiClient {
		ApiClient::builder()
			.base_url(server.uri())
			.store(store)
			.retry_config(fast_retry())
			.build()
			.unwrap()
	}

	fn signed_in_store() -> Arc<MemoryStore> {
		let store = Arc::new(MemoryStore::new());
		let user = User {
			id: Id::from(1u64),
			name: "Admin".to_string(),
			email: None,
			role_name: "Super Admin".to_string(),
			institution_id: None,
			branch_id: None,
			can_create_branches: None,
			extra: Map::new(),
		};
		Session::new(store.clone()).save_auth_data("secret", &user).unwrap();
		store
	}

	#[test]
	fn test_builder_normalizes_base_url() {
		let client = ApiClient::builder()
			.base_url("http://localhost:3001/")
			.build()
			.unwrap();
		assert_eq!(client.base_url(), "http://localhost:3001");
	}

	#[test]
	fn test_builder_rejects_invalid_base_url() {
		let result = ApiClient::builder().base_url("not a url").build();
		assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
	}

	#[test]
	fn test_default_base_url() {
		let client = ApiClient::builder().build().unwrap();
		assert_eq!(client.base_url(), DEFAULT_BASE_URL);
	}

	#[tokio::test]
	async fn test_get_sends_auth_and_cache_buster() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/users"))
			.and(query_param("page", "2"))
			.and(query_param("limit", "10"))
			.and(header("authorization", "Bearer secret"))
			.and(header("content-type", "application/json"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
			.expect(1)
			.mount(&server)
			.await;

		let client = client_for(&server, signed_in_store());
		let body: Value = client
			.get("/users", &[("page", "2".to_string()), ("limit", "10".to_string())])
			.await
			.unwrap();
		assert_eq!(body, json!({ "data": [] }));

		let requests = server.received_requests().await.unwrap();
		let query = requests[0].url.query().unwrap_or_default().to_string();
		assert!(query.contains("_t="), "missing cache buster in {query}");
	}

	#[tokio::test]
	async fn test_write_has_no_cache_buster_and_sends_body() {
		let server = MockServer::start().await;
		Mock::given(method("PATCH"))
			.and(path("/loans/4/status"))
			.and(body_json(json!({ "status": "approved" })))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 4 })))
			.expect(1)
			.mount(&server)
			.await;

		let client = client_for(&server, signed_in_store());
		let _: Value = client
			.send(Method::PATCH, "/loans/4/status", Some(&json!({ "status": "approved" })))
			.await
			.unwrap();

		let requests = server.received_requests().await.unwrap();
		assert_eq!(requests[0].url.query(), None);
	}

	#[tokio::test]
	async fn test_no_token_means_no_auth_header() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
			.mount(&server)
			.await;

		let client = client_for(&server, Arc::new(MemoryStore::new()));
		let _: Value = client.get("/products/active", &[]).await.unwrap();

		let requests = server.received_requests().await.unwrap();
		assert!(!requests[0].headers.contains_key("authorization"));
	}

	#[tokio::test]
	async fn test_unauthorized_clears_session() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "expired" })))
			.mount(&server)
			.await;

		let store = signed_in_store();
		let client = client_for(&server, store);
		let result: Result<Value> = client.get("/users/me", &[]).await;

		assert!(matches!(result, Err(ApiError::Unauthorized)));
		assert!(!client.session().is_authenticated());
		assert!(client.session().current_user().is_none());
	}

	#[tokio::test]
	async fn test_login_unauthorized_keeps_message() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/auth/login"))
			.respond_with(
				ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
			)
			.mount(&server)
			.await;

		let client = client_for(&server, signed_in_store());
		let result: Result<Value> = client
			.send(Method::POST, LOGIN_ENDPOINT, Some(&json!({ "email": "a", "password": "b" })))
			.await;

		match result {
			Err(ApiError::Server { status, message }) => {
				assert_eq!(status, 401);
				assert_eq!(message, "Invalid credentials");
			}
			other => panic!("unexpected result: {other:?}"),
		}
		assert!(client.session().is_authenticated());
	}

	#[tokio::test]
	async fn test_error_without_message_uses_default() {
		let server = MockServer::start().await;
		Mock::given(method("DELETE"))
			.respond_with(ResponseTemplate::new(404).set_body_string("<html>nope</html>"))
			.mount(&server)
			.await;

		let client = client_for(&server, signed_in_store());
		let result: Result<Value> = client.send(Method::DELETE, "/users/9", None::<&()>).await;

		match result {
			Err(ApiError::Server { status, message }) => {
				assert_eq!(status, 404);
				assert_eq!(message, DEFAULT_ERROR_MESSAGE);
			}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_no_content_is_null() {
		let server = MockServer::start().await;
		Mock::given(method("DELETE"))
			.respond_with(ResponseTemplate::new(204))
			.mount(&server)
			.await;

		let client = client_for(&server, signed_in_store());
		let value: Value = client
			.send(Method::DELETE, "/customers/3", None::<&()>)
			.await
			.unwrap();
		assert_eq!(value, Value::Null);

		let unit: Result<()> = client.send(Method::DELETE, "/customers/3", None::<&()>).await;
		assert!(unit.is_ok());
	}

	#[tokio::test]
	async fn test_get_retries_transient_status() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/customers"))
			.respond_with(ResponseTemplate::new(503).set_body_json(json!({ "message": "busy" })))
			.expect(3)
			.mount(&server)
			.await;

		let client = client_for(&server, signed_in_store());
		let result: Result<Value> = client.get("/customers", &[]).await;

		match result {
			Err(ApiError::Server { status, message }) => {
				assert_eq!(status, 503);
				assert_eq!(message, "busy");
			}
			other => panic!("unexpected result: {other:?}"),
		}
		assert_eq!(server.received_requests().await.unwrap().len(), 3);
	}

	#[tokio::test]
	async fn test_get_recovers_after_transient_status() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/loans/statistics"))
			.respond_with(ResponseTemplate::new(502))
			.up_to_n_times(1)
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path("/loans/statistics"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 7 })))
			.mount(&server)
			.await;

		let client = client_for(&server, signed_in_store());
		let body: Value = client.get("/loans/statistics", &[]).await.unwrap();
		assert_eq!(body, json!({ "total": 7 }));
		assert_eq!(server.received_requests().await.unwrap().len(), 2);
	}

	#[tokio::test]
	async fn test_client_errors_and_writes_are_not_retried() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(404))
			.mount(&server)
			.await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(503))
			.mount(&server)
			.await;

		let client = client_for(&server, signed_in_store());
		let missing: Result<Value> = client.get("/customers/99", &[]).await;
		assert_eq!(missing.unwrap_err().status(), Some(404));
		let write: Result<Value> = client.send(Method::POST, "/customers", Some(&json!({}))).await;
		assert_eq!(write.unwrap_err().status(), Some(503));

		assert_eq!(server.received_requests().await.unwrap().len(), 2);
	}
}
