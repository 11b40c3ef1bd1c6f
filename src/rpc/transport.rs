//! HTTP transport for paginated RPC backends.
//!
//! Wraps a [`reqwest::Client`] and maps everything that can go wrong at the
//! wire into the closed [`CallFailure`] set, so the call layer classifies
//! uniformly no matter what the transport hit. The endpoint does not time
//! calls out itself; the [`RpcCaller`](crate::rpc::RpcCaller) running the
//! call owns timeout policy.

use crate::config::EndpointConfig;
use crate::pagination::{PaginatedResults, Pagination};
use crate::rpc::error::{CallFailure, ValidationFailure};
use reqwest::header::WWW_AUTHENTICATE;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Contract version this client speaks, sent and checked as `X-Api-Version`.
pub const API_VERSION: &str = "1";

/// HTTP client for one backend, carrying base URL and bearer token.
#[derive(Debug, Clone)]
pub struct RpcEndpoint {
    client: Client,
    config: EndpointConfig,
    api_version: String,
}

impl RpcEndpoint {
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            api_version: API_VERSION.to_string(),
        }
    }

    /// Override the contract version, for clients pinned to an older server.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// The endpoint configuration.
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Mutable access, for token set/clear on login and logout.
    pub fn config_mut(&mut self) -> &mut EndpointConfig {
        &mut self.config
    }

    /// Fetch one page of rows via `GET {base}{path}?page=N&page_size=S`.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        pagination: &Pagination,
    ) -> Result<PaginatedResults<T>, CallFailure> {
        let request = self.client.get(self.config.api_url(path)).query(&[
            ("page", pagination.page_number()),
            ("page_size", pagination.page_size()),
        ]);
        self.execute_json(request).await
    }

    /// Invoke a backend method via `POST {base}{path}` with a JSON body.
    pub async fn call<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Resp, CallFailure> {
        let request = self.client.post(self.config.api_url(path)).json(body);
        self.execute_json(request).await
    }

    async fn execute_json<Resp: DeserializeOwned>(
        &self,
        mut request: RequestBuilder,
    ) -> Result<Resp, CallFailure> {
        request = request.header("X-Api-Version", &self.api_version);
        if let Some(token) = self.config.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_send_error)?;

        if let Some(server) = response
            .headers()
            .get("x-api-version")
            .and_then(|value| value.to_str().ok())
        {
            if server != self.api_version {
                return Err(CallFailure::incompatible(self.api_version.clone(), server));
            }
        }

        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(read_validation_failure(response).await);
        }
        if !status.is_success() {
            return Err(map_error_status(&response, status));
        }

        response
            .json()
            .await
            .map_err(|err| CallFailure::other(format!("response decode failed: {err}")))
    }
}

/// Map a send-level error. No status at all means the request never got a
/// response, which keeps the status-code-zero convention.
fn map_send_error(err: reqwest::Error) -> CallFailure {
    if err.is_timeout() {
        CallFailure::Timeout
    } else if err.is_connect() {
        CallFailure::status(0)
    } else if let Some(status) = err.status() {
        CallFailure::status(status.as_u16())
    } else {
        CallFailure::other(err.to_string())
    }
}

/// Map an error status, distinguishing a rejected bearer token from plain
/// authorization failure via the `WWW-Authenticate` challenge.
fn map_error_status(response: &Response, status: StatusCode) -> CallFailure {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let challenge = response
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");
        if challenge.contains("invalid_token") {
            return CallFailure::token_rejected(challenge);
        }
    }
    CallFailure::status(status.as_u16())
}

async fn read_validation_failure(response: Response) -> CallFailure {
    match response.json::<ValidationFailure>().await {
        Ok(failure) => CallFailure::Validation(failure),
        Err(err) => CallFailure::other(format!("malformed validation response: {err}")),
    }
}
