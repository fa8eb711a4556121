use crate::domain::AuditTag;
use crate::transport::document::ResponseDocument;

const RESPONSE: &str = "Response";
const SUCCESS: &str = "Success";
const DATA: &str = "Data";

const SMS: &str = "SMS";
const STATUS: &str = "Status";
const VALUE: &str = "Value";

/// `SMS/Status` value reported for an accepted message.
const SEND_SUCCESS_CODE: &str = "1";

/// A failed check, with the notifications it should produce.
pub trait CheckFailure: std::fmt::Display {
    /// Audit entry to record alongside the status notification.
    fn audit_entry(&self) -> Option<(AuditTag, String)> {
        None
    }

    /// Whether the failure is surfaced as a status notification at all.
    fn notifies(&self) -> bool {
        true
    }
}

/// The gateway answered, and said the call failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    #[error("Message failed: {0}")]
    Reason(String),

    #[error("Message failed for an unknown reason ({node} node missing).")]
    Unknown { node: &'static str },
}

impl ApiFailure {
    fn from_reason(reason: Option<String>, node: &'static str) -> Self {
        match reason {
            Some(reason) => Self::Reason(reason.trim().to_owned()),
            None => Self::Unknown { node },
        }
    }
}

impl CheckFailure for ApiFailure {}

/// Check the generic `Response/Success` flag.
///
/// Replies without that flag come from the send schema and are judged by
/// [`check_send_status`] instead. Anything other than an explicit `true` is a failure.
pub fn check_api_success(doc: &ResponseDocument) -> Result<(), ApiFailure> {
    let Some(success) = doc.select_text(&[RESPONSE, SUCCESS]) else {
        return check_send_status(doc);
    };

    if parse_bool(&success) == Some(true) {
        return Ok(());
    }

    Err(ApiFailure::from_reason(
        doc.select_text(&[RESPONSE, DATA]),
        "data",
    ))
}

/// Check the send schema's `SMS/Status` code.
///
/// A reply without a status is not treated as an error.
pub fn check_send_status(doc: &ResponseDocument) -> Result<(), ApiFailure> {
    let Some(status) = doc.select_text(&[SMS, STATUS]) else {
        return Ok(());
    };

    if status.trim() == SEND_SUCCESS_CODE {
        return Ok(());
    }

    Err(ApiFailure::from_reason(
        doc.select_text(&[SMS, VALUE]),
        "value",
    ))
}

/// Case-insensitive `true`/`false`, surrounding whitespace ignored.
pub fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(xml: &str) -> ResponseDocument {
        ResponseDocument::parse(xml).unwrap()
    }

    #[test]
    fn explicit_success_is_not_an_error() {
        let doc = doc("<Response><Success>true</Success></Response>");
        assert_eq!(check_api_success(&doc), Ok(()));

        let doc = doc_with_ns("<Success> True </Success>");
        assert_eq!(check_api_success(&doc), Ok(()));
    }

    fn doc_with_ns(children: &str) -> ResponseDocument {
        doc(&format!(
            r#"<Response xmlns="urn:example:gateway">{children}</Response>"#
        ))
    }

    #[test]
    fn failure_carries_data_reason() {
        let doc = doc("<Response><Success>false</Success><Data>Invalid number</Data></Response>");
        let err = check_api_success(&doc).unwrap_err();
        assert_eq!(err, ApiFailure::Reason("Invalid number".to_owned()));
        assert_eq!(err.to_string(), "Message failed: Invalid number");
    }

    #[test]
    fn failure_without_data_names_missing_node() {
        let doc = doc_with_ns("<Success>false</Success>");
        let err = check_api_success(&doc).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Message failed for an unknown reason (data node missing)."
        );
    }

    #[test]
    fn unparsable_success_flag_is_a_failure() {
        let doc = doc("<Response><Success>yes</Success><Data>odd</Data></Response>");
        assert_eq!(
            check_api_success(&doc),
            Err(ApiFailure::Reason("odd".to_owned()))
        );
    }

    #[test]
    fn missing_success_falls_back_to_send_status() {
        let ok = doc("<SMS><Status>1</Status></SMS>");
        assert_eq!(check_api_success(&ok), Ok(()));

        let failed = doc("<SMS><Status>0</Status><Value>Bad code</Value></SMS>");
        let err = check_api_success(&failed).unwrap_err();
        assert_eq!(err.to_string(), "Message failed: Bad code");
    }

    #[test]
    fn send_status_is_trimmed_before_comparison() {
        let doc = doc("<SMS><Status> 1 </Status></SMS>");
        assert_eq!(check_send_status(&doc), Ok(()));
    }

    #[test]
    fn send_status_without_value_names_missing_node() {
        let doc = doc("<SMS><Status>7</Status></SMS>");
        let err = check_send_status(&doc).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Message failed for an unknown reason (value node missing)."
        );
    }

    #[test]
    fn reply_with_neither_schema_is_not_an_error() {
        let doc = doc("<Other><Thing>x</Thing></Other>");
        assert_eq!(check_api_success(&doc), Ok(()));
    }

    #[test]
    fn reasons_are_trimmed() {
        let first = doc(
            "<Response>\n  <Success>false</Success>\n  <Data>\n   Invalid number\n  </Data>\n</Response>",
        );
        assert_eq!(
            check_api_success(&first).unwrap_err().to_string(),
            "Message failed: Invalid number"
        );

        let doc = doc("<SMS><Status>0</Status><Value>  Bad code\n</Value></SMS>");
        assert_eq!(
            check_send_status(&doc),
            Err(ApiFailure::Reason("Bad code".to_owned()))
        );
    }

    #[test]
    fn parse_bool_accepts_only_true_and_false() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" FALSE\n"), Some(false));
        assert_eq!(parse_bool("1"), None);
        assert_eq!(parse_bool(""), None);
    }
}
