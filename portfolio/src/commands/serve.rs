use anyhow::Context;
use portfolio_config::Config;
use portfolio_email_contracts::EmailService;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.http.host, config.http.port))
        .await
        .with_context(|| {
            format!(
                "Failed to bind http server to {}:{}",
                config.http.host, config.http.port
            )
        })?;

    serve_on(config, listener).await
}

/// Serve the api on an already bound listener.
pub async fn serve_on(config: Config, listener: TcpListener) -> anyhow::Result<()> {
    let email = email::connect(&config.email)?;
    if email.is_demo() {
        info!("No smtp host configured, contact form submissions will only be logged");
    } else {
        info!("Connecting to smtp server");
        if let Err(err) = email.ping().await {
            error!(
                "Failed to connect to smtp server, contact form submissions will fail until it is \
                 reachable: {err:#}"
            );
        }
    }

    let server = environment::rest_server(&config, email)?;
    info!("Starting http server on {}", listener.local_addr()?);
    server.serve_on(listener).await
}
