use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use portfolio_api_rest::RestServerConfig;
use portfolio_config::{Config, HttpConfig};
use portfolio_core_contact_impl::ContactServiceConfig;
use portfolio_core_health_impl::HealthServiceConfig;
use types::{Contact, Email, Health, RestServer, Template, Time};

pub mod types;

/// Wire up all services on top of an already connected email transport.
pub fn rest_server(config: &Config, email: Email) -> anyhow::Result<RestServer> {
    let time = Time::default();
    let template = Template::new()?;

    let contact = Contact::new(
        time,
        email.clone(),
        template,
        ContactServiceConfig {
            recipient: Arc::new(config.contact.recipient.clone()),
        },
    );

    let health = Health::new(
        time,
        email,
        HealthServiceConfig {
            cache_ttl: *config.health.cache_ttl,
        },
    );

    Ok(RestServer::new(health, contact, rest_server_config(&config.http)?))
}

fn rest_server_config(config: &HttpConfig) -> anyhow::Result<RestServerConfig> {
    let allowed_origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid allowed origin {origin:?}"))
        })
        .collect::<anyhow::Result<_>>()?;

    Ok(RestServerConfig { allowed_origins })
}
