//! Backend entry-point: applies migrations and serves the REST endpoints.

use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::server::{run, ServerConfig};

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

    let config = ServerConfig::from_env()
        .map_err(|err| std::io::Error::other(format!("configuration error: {err}")))?;

    run(config).await
}
