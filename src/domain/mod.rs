//! Domain layer: request values, validated types, and audit vocabulary (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{CellCheckRequest, SendRequest};
pub(crate) use response::ConfirmationResult;
pub use validation::ValidationError;
pub use value::{ApiKey, AuditTag};
