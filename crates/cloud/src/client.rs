//! RPC client shared by the authenticator and sessions.
//!
//! Sends one `{method, params}` POST and decodes the application envelope.
//! Knows nothing about tokens or which endpoint is the right one; callers
//! pass both in.

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;

use crate::config::CloudConfig;
use crate::envelope::{Envelope, RpcRequest};
use crate::error::{CloudError, Result};
use crate::identity::ClientIdentity;

/// Thin wrapper over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: reqwest::Client,
}

impl RpcClient {
    /// Build a client with the timeout from `config`.
    pub fn new(config: &CloudConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap a caller-built HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Headers for a request. Only login may be cached by intermediaries.
    fn headers(identity: &ClientIdentity, no_cache: bool) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let user_agent = HeaderValue::from_str(&identity.user_agent)
            .map_err(|_| CloudError::invalid_request("Invalid user agent format"))?;
        headers.insert(USER_AGENT, user_agent);

        if no_cache {
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        }

        Ok(headers)
    }

    /// Send one RPC and decode its envelope.
    ///
    /// A `token` of `None` marks the login call: no token parameter and no
    /// cache directive.
    pub async fn send(
        &self,
        endpoint: &str,
        identity: &ClientIdentity,
        token: Option<&str>,
        method: &str,
        params: Value,
    ) -> Result<Envelope> {
        let headers = Self::headers(identity, token.is_some())?;
        debug!("[Cloud] {} -> {}", method, endpoint);

        let response = self
            .client
            .post(endpoint)
            .headers(headers)
            .query(&identity.query_params(token))
            .json(&RpcRequest::new(method, params))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("[Cloud] {} response status {}", method, status);

        let envelope = match Envelope::decode(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(CloudError::http_status(status.as_u16(), &body));
            }
            Err(e) => return Err(e),
        };

        // A success code only counts inside a successful HTTP response.
        if !status.is_success() && matches!(envelope, Envelope::Success(_)) {
            return Err(CloudError::http_status(status.as_u16(), &body));
        }

        if let Envelope::Failure { code, message } = &envelope {
            warn!("[Cloud] {} failed with error_code {}: {}", method, code, message);
        }

        Ok(envelope)
    }
}
