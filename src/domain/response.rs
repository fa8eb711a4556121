/// Outcome of a cell confirmation reply.
///
/// Only `confirmed` reaches callers; carrier details are read when present and then dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ConfirmationResult {
    pub confirmed: bool,
    pub carrier: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl ConfirmationResult {
    pub fn not_confirmed() -> Self {
        Self::default()
    }
}
