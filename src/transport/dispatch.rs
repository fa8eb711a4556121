use crate::domain::{ApiKey, AuditTag, SendRequest};
use crate::transport::document::ResponseDocument;
use crate::transport::outcome::{ApiFailure, CheckFailure, check_api_success};

const PHONE_NUMBER: &str = "PhoneNumber";
const FROM_SMS: &str = "FromSMS";
const CLIENT_USER_ID: &str = "ClientUserId";
const MESSAGE: &str = "Message";

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Dispatch response was empty.")]
    Empty,

    #[error("Unable to parse dispatch response.")]
    Parse(#[source] xmltree::ParseError),

    #[error("Dispatch response invalid.")]
    Invalid,

    #[error(transparent)]
    Api(#[from] ApiFailure),
}

impl CheckFailure for DispatchError {
    fn audit_entry(&self) -> Option<(AuditTag, String)> {
        match self {
            Self::Parse(err) => Some((AuditTag::SystemError, err.to_string())),
            _ => None,
        }
    }
}

/// Form fields for the send endpoint. `password` and `note` are never sent.
pub fn encode_send_form(api_key: &ApiKey, request: &SendRequest) -> Vec<(String, String)> {
    vec![
        (ApiKey::FIELD.to_owned(), api_key.as_str().to_owned()),
        (PHONE_NUMBER.to_owned(), request.to.clone()),
        (FROM_SMS.to_owned(), request.from.clone()),
        (CLIENT_USER_ID.to_owned(), request.reference.clone()),
        (MESSAGE.to_owned(), request.message.clone()),
    ]
}

/// Decide whether a send reply reports a delivered message.
pub fn check_dispatch(text: &str) -> Result<(), DispatchError> {
    if text.trim().is_empty() {
        return Err(DispatchError::Empty);
    }

    let doc = ResponseDocument::parse(text).map_err(DispatchError::Parse)?;
    if doc.child_count() == 0 {
        return Err(DispatchError::Invalid);
    }

    check_api_success(&doc)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_send_form_uses_gateway_field_names() {
        let api_key = ApiKey::new("test_key").unwrap();
        let request = SendRequest::new("test_key", "15551234567", "15557654321", "hello")
            .reference("ref-42")
            .password("secret")
            .note("do not send");

        let params = encode_send_form(&api_key, &request);

        assert_eq!(
            params,
            vec![
                ("ApiKey".to_owned(), "test_key".to_owned()),
                ("PhoneNumber".to_owned(), "15551234567".to_owned()),
                ("FromSMS".to_owned(), "15557654321".to_owned()),
                ("ClientUserId".to_owned(), "ref-42".to_owned()),
                ("Message".to_owned(), "hello".to_owned()),
            ]
        );
        assert!(!params.iter().any(|(_, v)| v == "secret" || v == "do not send"));
    }

    #[test]
    fn accepts_generic_and_send_schema_successes() {
        assert!(check_dispatch("<Response><Success>true</Success></Response>").is_ok());
        assert!(check_dispatch("<SMS><Status>1</Status></SMS>").is_ok());
        assert!(
            check_dispatch(r#"<SMS xmlns="urn:example:sms"><Status>1</Status></SMS>"#).is_ok()
        );
    }

    #[test]
    fn utf16_declaration_from_string_writer_is_accepted() {
        let xml = r#"<?xml version="1.0" encoding="utf-16"?>
<SMS xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns="urn:example:sms">
  <Status>1</Status>
</SMS>"#;
        assert!(check_dispatch(xml).is_ok());

        let xml = r#"<?xml version="1.0" encoding="utf-16"?><Response><Success>false</Success><Data>Invalid number</Data></Response>"#;
        let err = check_dispatch(xml).unwrap_err();
        assert_eq!(err.to_string(), "Message failed: Invalid number");
    }

    #[test]
    fn blank_reply_is_empty() {
        let err = check_dispatch(" \n").unwrap_err();
        assert!(matches!(err, DispatchError::Empty));
        assert_eq!(err.to_string(), "Dispatch response was empty.");
        assert!(err.audit_entry().is_none());
    }

    #[test]
    fn malformed_reply_is_audited_as_system_error() {
        let err = check_dispatch("<Response><Success>").unwrap_err();
        assert!(matches!(err, DispatchError::Parse(_)));
        assert_eq!(err.to_string(), "Unable to parse dispatch response.");

        let (tag, message) = err.audit_entry().unwrap();
        assert_eq!(tag, AuditTag::SystemError);
        assert!(!message.is_empty());
    }

    #[test]
    fn childless_reply_is_invalid() {
        let err = check_dispatch("<Response/>").unwrap_err();
        assert!(matches!(err, DispatchError::Invalid));
        assert_eq!(err.to_string(), "Dispatch response invalid.");
    }

    #[test]
    fn api_failures_keep_the_gateway_reason() {
        let err = check_dispatch("<SMS><Status>0</Status><Value>Bad code</Value></SMS>")
            .unwrap_err();
        assert!(err.notifies());
        assert_eq!(err.to_string(), "Message failed: Bad code");
    }
}
