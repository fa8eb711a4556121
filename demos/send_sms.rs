use std::io;

use smsgate::{GatewayConfig, SendRequest, ShortMessageService};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("SMSGATE_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSGATE_API_KEY environment variable is required",
        )
    })?;
    let to = std::env::var("SMSGATE_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSGATE_TO environment variable is required",
        )
    })?;
    let from = std::env::var("SMSGATE_FROM").unwrap_or_default();
    let message = std::env::var("SMSGATE_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsgate demo.".to_owned());

    let service = ShortMessageService::builder(GatewayConfig::from_env()?)
        .on_audit_entry(|tag, message| eprintln!("audit [{tag}] {message}"))
        .on_status(|status, message| eprintln!("status {status}: {message}"))
        .build()?;

    let request = SendRequest::new(api_key, to, from, message).reference("smsgate-demo");
    let delivered = service.send(&request).await;
    println!("delivered: {delivered}");

    Ok(())
}
