//! Backend entry-point: wires the catalogue routes over the configured
//! backing services.

use std::env;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use backend::server::{ServerConfig, create_server};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
    let bind_addr = bind_addr
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR {bind_addr}: {e}")))?;

    let mut config = ServerConfig::new(bind_addr);
    match env::var("VERIFIER_URL") {
        Ok(raw) => {
            let url = Url::parse(&raw)
                .map_err(|e| std::io::Error::other(format!("invalid VERIFIER_URL {raw}: {e}")))?;
            config = config.with_verifier_url(url);
        }
        Err(_) => warn!("VERIFIER_URL not set, running without identity verification"),
    }

    create_server(config)?.await
}
