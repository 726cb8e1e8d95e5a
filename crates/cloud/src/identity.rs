//! Client identity attributes replayed on every cloud call.
//!
//! The account server binds a token to the identity presented at login, so a
//! [`ClientIdentity`] is fixed once an authenticator or session owns it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default application name reported to the cloud.
pub const DEFAULT_APP_NAME: &str = "Kasa_Android";

/// Default application version.
pub const DEFAULT_APP_VER: &str = "1.4.4.607";

/// Default OS platform string.
pub const DEFAULT_OSPF: &str = "Android+6.0.1";

/// Default network-type hint.
pub const DEFAULT_NET_TYPE: &str = "wifi";

/// Default locale.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Default `User-Agent` header, matching the mobile app build above.
pub const DEFAULT_USER_AGENT: &str = "Dalvik/2.1.0 (Linux; U; Android 6.0.1; A0001 Build/M4B30X)";

/// Identity attributes describing this client install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientIdentity {
    /// Install identifier (`termID`)
    #[serde(rename = "termID")]
    pub term_id: String,
    /// Application name (`appName`)
    pub app_name: String,
    /// Application version (`appVer`)
    pub app_ver: String,
    /// OS platform string (`ospf`)
    pub ospf: String,
    /// Network type hint (`netType`)
    pub net_type: String,
    /// Locale (`locale`)
    pub locale: String,
    /// Sent as the `User-Agent` header, not as a query parameter
    pub user_agent: String,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            term_id: generate_term_id(),
            app_name: DEFAULT_APP_NAME.to_string(),
            app_ver: DEFAULT_APP_VER.to_string(),
            ospf: DEFAULT_OSPF.to_string(),
            net_type: DEFAULT_NET_TYPE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientIdentity {
    /// Identity with vendor defaults and a freshly generated install identifier.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_term_id(mut self, term_id: impl Into<String>) -> Self {
        self.term_id = term_id.into();
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_app_ver(mut self, app_ver: impl Into<String>) -> Self {
        self.app_ver = app_ver.into();
        self
    }

    pub fn with_ospf(mut self, ospf: impl Into<String>) -> Self {
        self.ospf = ospf.into();
        self
    }

    pub fn with_net_type(mut self, net_type: impl Into<String>) -> Self {
        self.net_type = net_type.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Query parameters for a request, with the token appended when present.
    pub fn query_params<'a>(&'a self, token: Option<&'a str>) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![
            ("appName", self.app_name.as_str()),
            ("termID", self.term_id.as_str()),
            ("appVer", self.app_ver.as_str()),
            ("ospf", self.ospf.as_str()),
            ("netType", self.net_type.as_str()),
            ("locale", self.locale.as_str()),
        ];
        if let Some(token) = token {
            params.push(("token", token));
        }
        params
    }
}

/// Generate a new install identifier.
pub fn generate_term_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let identity = ClientIdentity::new();
        assert_eq!(identity.app_name, "Kasa_Android");
        assert_eq!(identity.app_ver, "1.4.4.607");
        assert_eq!(identity.ospf, "Android+6.0.1");
        assert_eq!(identity.net_type, "wifi");
        assert_eq!(identity.locale, "en_US");
        assert_eq!(identity.user_agent, DEFAULT_USER_AGENT);
        assert!(Uuid::parse_str(&identity.term_id).is_ok());
    }

    #[test]
    fn test_term_id_is_unique_per_construction() {
        let first = ClientIdentity::new();
        let second = ClientIdentity::default();
        assert!(!first.term_id.is_empty());
        assert!(!second.term_id.is_empty());
        assert_ne!(first.term_id, second.term_id);
    }

    #[test]
    fn test_overrides() {
        let identity = ClientIdentity::new()
            .with_term_id("install-1")
            .with_locale("es_ES")
            .with_user_agent("test-agent");
        assert_eq!(identity.term_id, "install-1");
        assert_eq!(identity.locale, "es_ES");
        assert_eq!(identity.user_agent, "test-agent");
        assert_eq!(identity.app_name, DEFAULT_APP_NAME);
    }

    #[test]
    fn test_query_params_without_token() {
        let identity = ClientIdentity::new().with_term_id("T");
        let params = identity.query_params(None);
        assert_eq!(
            params,
            vec![
                ("appName", "Kasa_Android"),
                ("termID", "T"),
                ("appVer", "1.4.4.607"),
                ("ospf", "Android+6.0.1"),
                ("netType", "wifi"),
                ("locale", "en_US"),
            ]
        );
    }

    #[test]
    fn test_query_params_with_token() {
        let identity = ClientIdentity::new();
        let params = identity.query_params(Some("abc"));
        assert_eq!(params.last(), Some(&("token", "abc")));
        assert!(!params.iter().any(|(key, _)| *key == "userAgent"));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let identity = ClientIdentity::new().with_term_id("T");
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["termID"], "T");
        assert_eq!(json["appName"], "Kasa_Android");
        assert_eq!(json["netType"], "wifi");
    }
}
