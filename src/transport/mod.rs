//! Transport layer: form encoding and XML reply interpretation (no I/O).

mod confirm;
mod dispatch;
mod document;
mod outcome;

pub use confirm::{check_cell_confirmation, encode_confirm_form};
pub use dispatch::{check_dispatch, encode_send_form};
pub use outcome::CheckFailure;
