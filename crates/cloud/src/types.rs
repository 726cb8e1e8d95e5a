//! Types for cloud API requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─────────────────────────────────────────────────────────────────────────────
// Credentials
// ─────────────────────────────────────────────────────────────────────────────

/// Account credentials. The password is never printed.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Params of the `login` method.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginParams<'a> {
    pub app_type: &'a str,
    pub cloud_user_name: &'a str,
    pub cloud_password: &'a str,
    #[serde(rename = "terminalUUID")]
    pub terminal_uuid: &'a str,
}

/// `result` of a successful login.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResult {
    #[serde(default)]
    pub token: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Device Types
// ─────────────────────────────────────────────────────────────────────────────

/// A device entry from the account's device list.
///
/// Fields the client does not know about are kept in `extra`, so a descriptor
/// serializes back to what the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptor {
    /// Unique device ID
    pub device_id: String,
    /// Application server the device is homed on
    #[serde(default)]
    pub app_server_url: String,
    /// Alternate ("v2") application server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_server_url_v2: Option<String>,
    /// User-assigned name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Product name (e.g. "Smart Wi-Fi Plug")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_hw_ver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fw_ver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hw_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fw_id: Option<String>,
    /// Online status as reported by the cloud (1 = online)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_same_region: Option<bool>,
    /// Everything else the server returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceDescriptor {
    pub fn new(device_id: impl Into<String>, app_server_url: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            app_server_url: app_server_url.into(),
            app_server_url_v2: None,
            alias: None,
            device_name: None,
            device_type: None,
            device_model: None,
            device_mac: None,
            device_hw_ver: None,
            fw_ver: None,
            device_region: None,
            oem_id: None,
            hw_id: None,
            fw_id: None,
            status: None,
            role: None,
            is_same_region: None,
            extra: Map::new(),
        }
    }

    /// Primary endpoint for device calls.
    pub fn endpoint(&self) -> &str {
        &self.app_server_url
    }

    /// Alternate endpoint, when the server supplied one.
    pub fn alternate_endpoint(&self) -> Option<&str> {
        self.app_server_url_v2.as_deref().filter(|url| !url.is_empty())
    }

    /// Alias, then product name, then device ID.
    pub fn display_name(&self) -> &str {
        self.alias
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.device_name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(self.device_id.as_str())
    }

    /// True if `needle` equals the alias, product name or device ID.
    pub fn matches(&self, needle: &str) -> bool {
        self.device_id == needle
            || self.alias.as_deref() == Some(needle)
            || self.device_name.as_deref() == Some(needle)
    }
}

/// `result` of `getDeviceList`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeviceListResult {
    #[serde(default)]
    pub device_list: Option<Vec<DeviceDescriptor>>,
}

/// Device info record, returned as sent by the device's application server.
pub type DeviceInfo = Map<String, Value>;
