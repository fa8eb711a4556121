/// One outbound message for [`ShortMessageService::send`](crate::ShortMessageService::send).
///
/// Every field is plain text. `password` and `note` are accepted for callers that carry them
/// around, but the gateway never receives them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendRequest {
    pub user: String,
    pub password: String,
    pub to: String,
    pub from: String,
    pub message: String,
    pub reference: String,
    pub note: String,
}

impl SendRequest {
    /// Build a request with the fields the gateway actually uses.
    pub fn new(
        user: impl Into<String>,
        to: impl Into<String>,
        from: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            to: to.into(),
            from: from.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Caller-side reference, echoed to the gateway as `ClientUserId`.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// Mobile-number check for [`ShortMessageService::is_a_cell`](crate::ShortMessageService::is_a_cell).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellCheckRequest {
    pub user: String,
    pub password: String,
    pub digits: String,
}

impl CellCheckRequest {
    pub fn new(user: impl Into<String>, digits: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            digits: digits.into(),
            ..Self::default()
        }
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}
