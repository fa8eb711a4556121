//! Typed Rust client for an XML-over-HTTP SMS gateway.
//!
//! The crate wraps two gateway methods: sending a message and checking whether a number
//! belongs to a mobile carrier. It is split into a domain layer of plain request values,
//! a transport layer for the gateway's XML reply quirks, and a small client layer that
//! posts the forms and reports failures through caller-supplied hooks.
//!
//! ```rust,no_run
//! use smsgate::{GatewayConfig, SendRequest, ShortMessageService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsgate::GatewayError> {
//!     let service = ShortMessageService::builder(GatewayConfig::from_env()?)
//!         .on_status(|status, message| eprintln!("{status}: {message}"))
//!         .build()?;
//!     let request = SendRequest::new("api-key", "15551234567", "15557654321", "hello");
//!     let _delivered = service.send(&request).await;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
mod transport;

pub use client::{GatewayError, ShortMessageService, ShortMessageServiceBuilder};
pub use crate::config::GatewayConfig;
pub use domain::{ApiKey, AuditTag, CellCheckRequest, SendRequest, ValidationError};
pub use reqwest::StatusCode;
