//! Login exchange: credentials plus identity in, [`Session`] out.

use log::{debug, info};

use crate::client::RpcClient;
use crate::config::CloudConfig;
use crate::error::{CloudError, Result};
use crate::identity::ClientIdentity;
use crate::session::Session;
use crate::types::{Credentials, LoginParams, LoginResult};

/// Holds credentials and identity for one login attempt.
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Credentials,
    identity: ClientIdentity,
    endpoint: String,
    client: RpcClient,
}

impl Authenticator {
    /// Create an authenticator against the default account server with a
    /// freshly generated identity.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientIdentity::default(), CloudConfig::default())
    }

    /// Create an authenticator with explicit identity and connection settings.
    pub fn with_config(
        credentials: Credentials,
        identity: ClientIdentity,
        config: CloudConfig,
    ) -> Result<Self> {
        let client = RpcClient::new(&config)?;
        Ok(Self::with_client(credentials, identity, &config.endpoint, client))
    }

    /// Create an authenticator that sends through an existing client.
    pub fn with_client(
        credentials: Credentials,
        identity: ClientIdentity,
        endpoint: &str,
        client: RpcClient,
    ) -> Self {
        Self {
            credentials,
            identity,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Exchange the held credentials for a token.
    ///
    /// The returned session carries this authenticator's identity, never
    /// values echoed back by the server.
    pub async fn login(&self) -> Result<Session> {
        debug!("[Auth] Logging in as {}", self.credentials.username());

        let params = LoginParams {
            app_type: &self.identity.app_name,
            cloud_user_name: self.credentials.username(),
            cloud_password: self.credentials.password(),
            terminal_uuid: &self.identity.term_id,
        };
        let params = serde_json::to_value(params)
            .map_err(|e| CloudError::invalid_request(format!("Failed to encode login: {}", e)))?;

        let result = self
            .client
            .send(&self.endpoint, &self.identity, None, "login", params)
            .await?
            .into_result(CloudError::authentication)?;

        let login: Option<LoginResult> = serde_json::from_value(result)
            .map_err(|e| CloudError::protocol(format!("malformed login result: {}", e)))?;
        let token = login
            .and_then(|login| login.token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| CloudError::protocol("no token in login response"))?;

        info!("[Auth] Logged in as {}", self.credentials.username());
        Ok(Session::new(
            token,
            self.identity.clone(),
            &self.endpoint,
            self.client.clone(),
        ))
    }
}
