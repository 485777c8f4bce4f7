//! Portal credentials and endpoint configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default portal base URL.
pub const DEFAULT_BASE_URL: &str = "https://portal.adtpulse.com";

/// Fixed bound on every network call the client makes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the portal client.
///
/// The password is sensitive and must never appear in logs; the manual
/// `Debug` impl below redacts it.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortalConfig {
    /// Portal base URL. Overridable for testing against a local server.
    pub base_url: String,
    /// Portal account username.
    pub username: String,
    /// Portal account password. Sensitive: never log this value.
    pub password: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,
}

impl PortalConfig {
    /// Configuration against the production portal with the default timeout.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: username.into(),
            password: password.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Same credentials against a custom base URL (for testing).
    pub fn with_base_url(
        username: impl Into<String>,
        password: impl Into<String>,
        base_url: &str,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::new(username, password)
        }
    }
}

impl std::fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

/// Serialize the timeout as whole seconds so it reads naturally in config
/// files.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
