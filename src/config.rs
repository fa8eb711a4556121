//! Gateway endpoint configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::client::GatewayError;

/// Environment variable prefix read by [`GatewayConfig::from_env`].
pub const ENV_PREFIX: &str = "SMSGATE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Where the gateway lives and which methods to call on it.
///
/// `send_method` and `confirm_method` are resolved relative to `base_url`.
pub struct GatewayConfig {
    pub base_url: String,
    pub send_method: String,
    pub confirm_method: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl GatewayConfig {
    pub fn new(
        base_url: impl Into<String>,
        send_method: impl Into<String>,
        confirm_method: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            send_method: send_method.into(),
            confirm_method: confirm_method.into(),
            timeout_secs: None,
            user_agent: None,
        }
    }

    /// Load from `SMSGATE_BASE_URL`, `SMSGATE_SEND_METHOD`, `SMSGATE_CONFIRM_METHOD`,
    /// and the optional `SMSGATE_TIMEOUT_SECS` / `SMSGATE_USER_AGENT`.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(environment: config::Environment) -> Result<Self, GatewayError> {
        let settings = config::Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
