use crate::domain::{ApiKey, AuditTag, CellCheckRequest, ConfirmationResult};
use crate::transport::document::ResponseDocument;
use crate::transport::outcome::{ApiFailure, CheckFailure, check_api_success, parse_bool};

const PHONE_NUMBER: &str = "PhoneNumber";

const RESPONSE: &str = "Response";
const WIRELESS: &str = "Wireless";
const COMPANY: &str = "Company";
const RATE_CENTER: &str = "RC";
const STATE: &str = "State";

#[derive(Debug, thiserror::Error)]
pub enum ConfirmationError {
    #[error("Cell phone confirmation response was empty.")]
    Empty,

    #[error("Unable to parse cell confirmation response.")]
    Parse(#[source] xmltree::ParseError),

    /// Parsed, but nothing below the root element. Not reported.
    #[error("Cell phone confirmation response has no content.")]
    NoContent,

    #[error(transparent)]
    Api(#[from] ApiFailure),

    #[error("Unable to obtain wireless confirmation result.")]
    MissingWireless,
}

impl CheckFailure for ConfirmationError {
    fn audit_entry(&self) -> Option<(AuditTag, String)> {
        match self {
            Self::Parse(err) => Some((AuditTag::SystemWarning, err.to_string())),
            _ => None,
        }
    }

    fn notifies(&self) -> bool {
        !matches!(self, Self::NoContent)
    }
}

pub fn encode_confirm_form(api_key: &ApiKey, request: &CellCheckRequest) -> Vec<(String, String)> {
    vec![
        (ApiKey::FIELD.to_owned(), api_key.as_str().to_owned()),
        (PHONE_NUMBER.to_owned(), request.digits.clone()),
    ]
}

/// Interpret a confirm reply for `digits`.
///
/// A `Wireless` flag that is present but not `true` is a plain "not a cell" answer rather
/// than an error.
pub fn check_cell_confirmation(
    digits: &str,
    text: &str,
) -> Result<ConfirmationResult, ConfirmationError> {
    if text.trim().is_empty() {
        return Err(ConfirmationError::Empty);
    }

    let doc = ResponseDocument::parse(text).map_err(ConfirmationError::Parse)?;
    if doc.child_count() == 0 {
        return Err(ConfirmationError::NoContent);
    }

    check_api_success(&doc)?;

    let wireless = doc
        .select_text(&[RESPONSE, WIRELESS])
        .ok_or(ConfirmationError::MissingWireless)?;
    if parse_bool(&wireless) != Some(true) {
        tracing::debug!(digits, wireless = %wireless.trim(), "number is not wireless");
        return Ok(ConfirmationResult::not_confirmed());
    }

    Ok(ConfirmationResult {
        confirmed: true,
        carrier: doc.select_text(&[RESPONSE, COMPANY]),
        city: doc.select_text(&[RESPONSE, RATE_CENTER]),
        state: doc.select_text(&[RESPONSE, STATE]),
    })
}
