//! Client layer: orchestrates transport calls and turns every failure into notifications.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;

use crate::config::GatewayConfig;
use crate::domain::{ApiKey, AuditTag, CellCheckRequest, SendRequest};
use crate::transport::{self, CheckFailure};

const API_KEY_NOT_CONFIGURED: &str = "Client api key not configured.";
const DISPATCH_FAILED: &str = "Problem dispatching message. It was not delivered.";
const CONFIRM_FAILED: &str = "Problem confirming number as a cell phone.";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type AuditHook = Arc<dyn Fn(&str, &str) + Send + Sync>;
type StatusHook = Arc<dyn Fn(StatusCode, &str) + Send + Sync>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

impl HttpResponse {
    /// Error text for a reply that carried no content.
    fn last_error(&self) -> String {
        format!("empty response body (HTTP {})", self.status)
    }
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors raised while constructing a [`ShortMessageService`].
///
/// Calls on a built service never fail with an error; they report through the
/// notification hooks and return `false`.
pub enum GatewayError {
    /// A base URL or method path that does not form a valid URL.
    #[error("invalid endpoint {value:?}: {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be created (TLS backend, invalid user-agent, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Configuration could not be loaded or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Why an outbound call produced no usable reply.
#[derive(Debug, thiserror::Error)]
enum CallError {
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16 },
}

#[derive(Clone, Default)]
struct NotificationHooks {
    audit: Option<AuditHook>,
    status: Option<StatusHook>,
}

impl NotificationHooks {
    fn audit(&self, tag: AuditTag, message: &str) {
        match tag {
            AuditTag::SystemError => tracing::error!(action = %tag, "{message}"),
            AuditTag::SystemWarning => tracing::warn!(action = %tag, "{message}"),
        }
        if let Some(hook) = &self.audit {
            hook(tag.as_str(), message);
        }
    }

    /// Every failure surfaces as an internal server error; only the message differs.
    fn fail(&self, message: &str) {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        tracing::warn!(status = status.as_u16(), "{message}");
        if let Some(hook) = &self.status {
            hook(status, message);
        }
    }

    fn report(&self, failure: &impl CheckFailure) {
        if let Some((tag, message)) = failure.audit_entry() {
            self.audit(tag, &message);
        }
        if failure.notifies() {
            self.fail(&failure.to_string());
        } else {
            tracing::debug!("{failure}");
        }
    }
}

/// Builder for [`ShortMessageService`].
///
/// Use this to attach notification hooks or override the timeout/user-agent from the config.
pub struct ShortMessageServiceBuilder {
    config: GatewayConfig,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    hooks: NotificationHooks,
}

impl ShortMessageServiceBuilder {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            config,
            hooks: NotificationHooks::default(),
        }
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Receive audit entries as `(action tag, message)`, e.g. `("SYSTEM:ERROR", "...")`.
    pub fn on_audit_entry<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.hooks.audit = Some(Arc::new(hook));
        self
    }

    /// Receive failure notifications meant for whoever surfaces errors to API consumers.
    pub fn on_status<F>(mut self, hook: F) -> Self
    where
        F: Fn(StatusCode, &str) + Send + Sync + 'static,
    {
        self.hooks.status = Some(Arc::new(hook));
        self
    }

    /// Build a [`ShortMessageService`].
    pub fn build(self) -> Result<ShortMessageService, GatewayError> {
        let send_endpoint = resolve_endpoint(&self.config.base_url, &self.config.send_method)?;
        let confirm_endpoint =
            resolve_endpoint(&self.config.base_url, &self.config.confirm_method)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| GatewayError::Transport(Box::new(err)))?;

        Ok(ShortMessageService {
            send_endpoint,
            confirm_endpoint,
            http: Arc::new(ReqwestTransport { client }),
            hooks: self.hooks,
        })
    }
}

#[derive(Clone)]
/// Adapter for the gateway's send and confirm endpoints.
///
/// Each call makes at most one form-encoded POST and answers with a plain `bool`. Failures
/// are reported through the hooks registered on [`ShortMessageServiceBuilder`], always with
/// `500 Internal Server Error`, and are never returned as errors. The service holds no
/// per-call state and can be shared freely.
pub struct ShortMessageService {
    send_endpoint: String,
    confirm_endpoint: String,
    http: Arc<dyn HttpTransport>,
    hooks: NotificationHooks,
}

impl ShortMessageService {
    /// Create a service without notification hooks.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        Self::builder(config).build()
    }

    pub fn builder(config: GatewayConfig) -> ShortMessageServiceBuilder {
        ShortMessageServiceBuilder::new(config)
    }

    pub fn send_endpoint(&self) -> &str {
        &self.send_endpoint
    }

    pub fn confirm_endpoint(&self) -> &str {
        &self.confirm_endpoint
    }

    /// Dispatch one message. Returns `true` only when the gateway accepted it.
    pub async fn send(&self, request: &SendRequest) -> bool {
        let Some(api_key) = self.api_key(&request.user) else {
            return false;
        };

        let params = transport::encode_send_form(&api_key, request);
        let response = match self.post(&self.send_endpoint, params).await {
            Ok(response) => response,
            Err(err) => {
                self.hooks.audit(AuditTag::SystemError, &err.to_string());
                self.hooks.fail(DISPATCH_FAILED);
                return false;
            }
        };

        if response.body.is_empty() {
            self.hooks.fail(&response.last_error());
            return false;
        }

        match transport::check_dispatch(&response.body) {
            Ok(()) => true,
            Err(err) => {
                self.hooks.report(&err);
                false
            }
        }
    }

    /// Ask the gateway whether `digits` belongs to a mobile carrier.
    pub async fn is_a_cell(&self, request: &CellCheckRequest) -> bool {
        let Some(api_key) = self.api_key(&request.user) else {
            return false;
        };

        let params = transport::encode_confirm_form(&api_key, request);
        let response = match self.post(&self.confirm_endpoint, params).await {
            Ok(response) => response,
            Err(err) => {
                self.hooks.audit(AuditTag::SystemError, &err.to_string());
                self.hooks.fail(CONFIRM_FAILED);
                return false;
            }
        };

        match transport::check_cell_confirmation(&request.digits, &response.body) {
            Ok(result) => {
                if result.confirmed {
                    tracing::debug!(
                        carrier = ?result.carrier,
                        city = ?result.city,
                        state = ?result.state,
                        "number confirmed as wireless"
                    );
                }
                result.confirmed
            }
            Err(err) => {
                self.hooks.report(&err);
                false
            }
        }
    }

    /// Keyword reservation is not offered by the gateway; always `false`.
    pub fn is_keyword_available(
        &self,
        _user: &str,
        _password: &str,
        _did: &str,
        _keyword: &str,
    ) -> bool {
        false
    }

    fn api_key(&self, user: &str) -> Option<ApiKey> {
        match ApiKey::new(user) {
            Ok(api_key) => Some(api_key),
            Err(err) => {
                tracing::debug!(%err, "rejecting call before dispatch");
                self.hooks.fail(API_KEY_NOT_CONFIGURED);
                None
            }
        }
    }

    async fn post(
        &self,
        url: &str,
        params: Vec<(String, String)>,
    ) -> Result<HttpResponse, CallError> {
        tracing::debug!(url, "posting to gateway");
        let response = self
            .http
            .post_form(url, params)
            .await
            .map_err(CallError::Transport)?;

        if !(200..=299).contains(&response.status) {
            return Err(CallError::HttpStatus {
                status: response.status,
            });
        }
        Ok(response)
    }
}

/// Join `method` onto `base_url`, treating the base as a directory.
fn resolve_endpoint(base_url: &str, method: &str) -> Result<String, GatewayError> {
    let mut base = url::Url::parse(base_url).map_err(|source| GatewayError::InvalidEndpoint {
        value: base_url.to_owned(),
        source,
    })?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let endpoint = base
        .join(method.trim_start_matches('/'))
        .map_err(|source| GatewayError::InvalidEndpoint {
            value: method.to_owned(),
            source,
        })?;
    Ok(endpoint.into())
}
