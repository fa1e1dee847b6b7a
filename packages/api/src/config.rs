//! # Client configuration: environment and endpoint resolution
//!
//! Resolves the page's host name to an [`Environment`] and derives the absolute
//! URL of every backend operation the client calls.
//!
//! ## Settings document
//!
//! Base URLs per environment come from [`ClientSettings`], a small TOML
//! document embedded in the web binary:
//!
//! ```toml
//! [development]
//! api_base_url = "http://localhost:5000"
//! frontend_url = "http://localhost:5000"
//!
//! [production]
//! api_base_url = "https://your-production-api.com"
//! frontend_url = "https://your-production-domain.com"
//! ```
//!
//! Every field has a default, so an empty document is equivalent to
//! [`ClientSettings::default`].
//!
//! ## Resolution
//!
//! [`ClientConfig::resolve`] is a pure function of the host name, protocol and
//! settings. The result is built once at startup and handed to the UI by
//! context; nothing in this crate keeps it in a global.
//!
//! | Host | Environment |
//! |------|-------------|
//! | `localhost`, `127.0.0.1` | [`Environment::Development`] |
//! | anything else | [`Environment::Production`] |

use serde::{Deserialize, Serialize};

const DEV_API_BASE_URL: &str = "http://localhost:5000";
const DEV_FRONTEND_URL: &str = "http://localhost:5000";
const PROD_API_BASE_URL: &str = "https://your-production-api.com";
const PROD_FRONTEND_URL: &str = "https://your-production-domain.com";

/// Deployment context of the running page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Environment for a browser host name.
    pub fn from_host(host_name: &str) -> Self {
        match host_name {
            "localhost" | "127.0.0.1" => Self::Development,
            _ => Self::Production,
        }
    }

    /// Parse an environment tag. Unknown tags resolve to development.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level client settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "EnvironmentSettings::development")]
    pub development: EnvironmentSettings,
    #[serde(default = "EnvironmentSettings::production")]
    pub production: EnvironmentSettings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            development: EnvironmentSettings::development(),
            production: EnvironmentSettings::production(),
        }
    }
}

impl ClientSettings {
    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn for_environment(&self, environment: Environment) -> &EnvironmentSettings {
        match environment {
            Environment::Development => &self.development,
            Environment::Production => &self.production,
        }
    }
}

/// Base URLs for one environment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSettings {
    pub api_base_url: String,
    pub frontend_url: String,
}

impl EnvironmentSettings {
    fn development() -> Self {
        Self {
            api_base_url: DEV_API_BASE_URL.to_string(),
            frontend_url: DEV_FRONTEND_URL.to_string(),
        }
    }

    fn production() -> Self {
        Self {
            api_base_url: PROD_API_BASE_URL.to_string(),
            frontend_url: PROD_FRONTEND_URL.to_string(),
        }
    }
}

/// Absolute URLs of the backend operations, keyed by logical name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointMap {
    pub bookings: String,
    pub vnpay_create: String,
    pub vnpay_return: String,
    pub vnpay_config: String,
    pub health: String,
    pub login: String,
}

impl EndpointMap {
    pub fn from_base(api_base_url: &str) -> Self {
        let base = api_base_url.trim_end_matches('/');
        Self {
            bookings: format!("{base}/api/bookings"),
            vnpay_create: format!("{base}/api/payment/vnpay/create"),
            vnpay_return: format!("{base}/api/payment/vnpay/return"),
            vnpay_config: format!("{base}/api/payment/config"),
            health: format!("{base}/health"),
            login: format!("{base}/api/auth/login"),
        }
    }

    /// Look an endpoint up by its logical key (`"vnpayCreate"`, `"health"`, ...).
    pub fn get(&self, name: &str) -> Option<&str> {
        let url = match name {
            "bookings" => &self.bookings,
            "vnpayCreate" => &self.vnpay_create,
            "vnpayReturn" => &self.vnpay_return,
            "vnpayConfig" => &self.vnpay_config,
            "health" => &self.health,
            "login" => &self.login,
            _ => return None,
        };
        Some(url)
    }
}

/// Snapshot of the resolved configuration, logged in development.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub environment: Environment,
    pub api_base_url: String,
    pub frontend_url: String,
    pub hostname: String,
    pub protocol: String,
}

/// Immutable, fully resolved client configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    environment: Environment,
    api_base_url: String,
    frontend_url: String,
    host_name: String,
    protocol: String,
    endpoints: EndpointMap,
}

impl ClientConfig {
    pub fn resolve(host_name: &str, protocol: &str, settings: &ClientSettings) -> Self {
        let environment = Environment::from_host(host_name);
        let urls = settings.for_environment(environment);
        let config = Self {
            environment,
            api_base_url: urls.api_base_url.clone(),
            frontend_url: urls.frontend_url.clone(),
            host_name: host_name.to_string(),
            protocol: protocol.to_string(),
            endpoints: EndpointMap::from_base(&urls.api_base_url),
        };

        if environment == Environment::Development {
            tracing::debug!(debug_info = ?config.debug_info(), "SkyPlan config");
            tracing::debug!(endpoints = ?config.endpoints, "API endpoints");
        }
        config
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn endpoints(&self) -> &EndpointMap {
        &self.endpoints
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn frontend_url(&self) -> &str {
        &self.frontend_url
    }

    /// Page VNPay sends the customer back to after payment.
    pub fn vnpay_return_url(&self) -> String {
        format!("{}/confirmation.html", self.frontend_url.trim_end_matches('/'))
    }

    pub fn debug_info(&self) -> DebugInfo {
        DebugInfo {
            environment: self.environment,
            api_base_url: self.api_base_url.clone(),
            frontend_url: self.frontend_url.clone(),
            hostname: self.host_name.clone(),
            protocol: self.protocol.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localhost_is_development() {
        let config = ClientConfig::resolve("localhost", "http:", &ClientSettings::default());
        assert_eq!(config.environment(), Environment::Development);
        assert_eq!(
            config.endpoints().bookings,
            "http://localhost:5000/api/bookings"
        );
        assert_eq!(
            config.endpoints().get("vnpayCreate"),
            Some("http://localhost:5000/api/payment/vnpay/create")
        );
        assert_eq!(
            Environment::from_host("127.0.0.1"),
            Environment::Development
        );
    }

    #[test]
    fn test_other_hosts_are_production() {
        let config = ClientConfig::resolve("skyplan.vn", "https:", &ClientSettings::default());
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(
            config.endpoints().health,
            "https://your-production-api.com/health"
        );
        assert_eq!(
            config.endpoints().get("vnpayConfig"),
            Some("https://your-production-api.com/api/payment/config")
        );
        assert_eq!(
            config.vnpay_return_url(),
            "https://your-production-domain.com/confirmation.html"
        );
    }

    #[test]
    fn test_endpoint_keys() {
        let endpoints = EndpointMap::from_base("http://api.test/");
        for key in ["bookings", "vnpayCreate", "vnpayReturn", "vnpayConfig", "health", "login"] {
            let url = endpoints.get(key).unwrap();
            assert!(url.starts_with("http://api.test/"), "{key} -> {url}");
            assert!(!url.starts_with("http://api.test//"));
        }
        assert_eq!(endpoints.login, "http://api.test/api/auth/login");
        assert!(endpoints.get("unknown").is_none());
    }

    #[test]
    fn test_unknown_tag_falls_back_to_development() {
        assert_eq!(Environment::from_tag("staging"), Environment::Development);
        assert_eq!(Environment::from_tag("Production"), Environment::Production);
    }

    #[test]
    fn test_settings_toml_roundtrip() {
        // Empty document is the default
        let settings = ClientSettings::from_toml("").unwrap();
        assert_eq!(settings, ClientSettings::default());

        let settings = ClientSettings::from_toml(
            r#"
            [production]
            api_base_url = "https://api.skyplan.vn"
            frontend_url = "https://skyplan.vn"
            "#,
        )
        .unwrap();
        assert_eq!(settings.development.api_base_url, "http://localhost:5000");

        let config = ClientConfig::resolve("skyplan.vn", "https:", &settings);
        assert_eq!(
            config.endpoints().login,
            "https://api.skyplan.vn/api/auth/login"
        );

        let written = settings.to_toml().unwrap();
        assert_eq!(ClientSettings::from_toml(&written).unwrap(), settings);
    }

    #[test]
    fn test_debug_info() {
        let config = ClientConfig::resolve("localhost", "http:", &ClientSettings::default());
        let info = config.debug_info();
        assert_eq!(info.environment, Environment::Development);
        assert_eq!(info.hostname, "localhost");
        assert_eq!(info.protocol, "http:");
        assert_eq!(info.api_base_url, "http://localhost:5000");
    }
}
