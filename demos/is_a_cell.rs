use std::io;

use smsgate::{CellCheckRequest, GatewayConfig, ShortMessageService};
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
    let digits = std::env::var("SMSGATE_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSGATE_PHONE environment variable is required",
        )
    })?;

    let service = ShortMessageService::builder(GatewayConfig::from_env()?)
        .on_status(|status, message| eprintln!("status {status}: {message}"))
        .build()?;

    let is_cell = service
        .is_a_cell(&CellCheckRequest::new(api_key, digits))
        .await;
    println!("{is_cell}");

    Ok(())
}
