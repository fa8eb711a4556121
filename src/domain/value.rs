use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway API key, sent as the `ApiKey` form field on every call.
///
/// Invariant: non-empty. The key is sent exactly as given.
pub struct ApiKey(String);

impl ApiKey {
    /// Form field name used by the gateway (`ApiKey`).
    pub const FIELD: &'static str = "ApiKey";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the key as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Action tag attached to audit entries.
pub enum AuditTag {
    /// A call could not be completed (transport failure, unreadable dispatch reply).
    SystemError,
    /// A reply could not be interpreted, but nothing was dispatched.
    SystemWarning,
}

impl AuditTag {
    /// Tag text handed to the audit hook.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SystemError => "SYSTEM:ERROR",
            Self::SystemWarning => "SYSTEM:WARNING",
        }
    }
}

impl std::fmt::Display for AuditTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
