//! Authorized calls made with a login token.
//!
//! Directory calls (device listing) go to the fixed account server. Device
//! calls go to the application server named by the device's descriptor,
//! because devices may be homed on different regional servers.

use log::debug;
use serde_json::{json, Value};

use crate::client::RpcClient;
use crate::envelope::is_empty_result;
use crate::error::{CloudError, Result};
use crate::identity::ClientIdentity;
use crate::types::{DeviceDescriptor, DeviceInfo, DeviceListResult};

/// A logged-in session. Immutable; clone it freely across tasks.
#[derive(Clone)]
pub struct Session {
    token: String,
    identity: ClientIdentity,
    endpoint: String,
    client: RpcClient,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("identity", &self.identity)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Session {
    pub(crate) fn new(
        token: String,
        identity: ClientIdentity,
        endpoint: &str,
        client: RpcClient,
    ) -> Self {
        Self {
            token,
            identity,
            endpoint: endpoint.to_string(),
            client,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Identity this session's token was issued for.
    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    /// Fixed account-server endpoint used for directory calls.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `method` to `endpoint` and return the raw `result` payload.
    ///
    /// A non-zero `error_code` fails with [`CloudError::Request`]. Nothing is
    /// retried.
    pub async fn call(&self, method: &str, endpoint: &str, params: Value) -> Result<Value> {
        self.client
            .send(endpoint, &self.identity, Some(&self.token), method, params)
            .await?
            .into_result(CloudError::request)
    }

    /// Call `method` on the fixed account server.
    pub async fn directory_call(&self, method: &str, params: Value) -> Result<Value> {
        self.call(method, &self.endpoint, params).await
    }

    /// Call `method` on the application server `device` is homed on.
    pub async fn device_call(
        &self,
        method: &str,
        device: &DeviceDescriptor,
        params: Value,
    ) -> Result<Value> {
        let endpoint = device_endpoint(device)?;
        debug!(
            "[Session] Routing {} for device {} to {}",
            method, device.device_id, endpoint
        );
        self.call(method, endpoint, params).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Device Directory
    // ─────────────────────────────────────────────────────────────────────────

    /// List the account's devices in the order the server returns them.
    pub async fn list_devices(&self) -> Result<Vec<DeviceDescriptor>> {
        let result = self.directory_call("getDeviceList", json!({})).await?;

        let list: Option<DeviceListResult> = serde_json::from_value(result)
            .map_err(|e| CloudError::protocol(format!("malformed device list: {}", e)))?;
        let devices = list
            .and_then(|list| list.device_list)
            .ok_or_else(|| CloudError::protocol("no device list in response"))?;

        debug!("[Session] Found {} devices", devices.len());
        Ok(devices)
    }

    /// Fetch the info record of one device from its own application server.
    pub async fn get_device_info(&self, device: &DeviceDescriptor) -> Result<DeviceInfo> {
        if device.device_id.is_empty() {
            return Err(CloudError::invalid_request("Device descriptor has no device ID"));
        }

        let result = self
            .device_call(
                "getDeviceInfo",
                device,
                json!({ "deviceId": device.device_id }),
            )
            .await?;

        if is_empty_result(&result) {
            return Err(CloudError::not_found(format!(
                "no info for device {}",
                device.device_id
            )));
        }

        match result {
            Value::Object(info) => Ok(info),
            other => Err(CloudError::protocol(format!(
                "device info is not an object: {}",
                other
            ))),
        }
    }
}

/// The descriptor's endpoint, if it is an absolute http(s) URL.
fn device_endpoint(device: &DeviceDescriptor) -> Result<&str> {
    let endpoint = device.endpoint();
    if endpoint.is_empty() {
        return Err(CloudError::invalid_request(format!(
            "Device {} has no application server URL",
            device.device_id
        )));
    }

    let url = reqwest::Url::parse(endpoint).map_err(|e| {
        CloudError::invalid_request(format!("Invalid device endpoint {}: {}", endpoint, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CloudError::invalid_request(format!(
            "Unsupported device endpoint scheme: {}",
            url.scheme()
        )));
    }

    Ok(endpoint)
}
