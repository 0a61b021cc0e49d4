//! Database connection pool management

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{config::DatabaseConfig, error::Result};

/// Create a PostgreSQL pool, retrying with exponential backoff
///
/// Makes up to `max_retries + 1` attempts, waiting `retry_delay_secs`,
/// then twice that, and so on between them.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let url = mask_password(&config.url);
    let mut attempt = 0;

    loop {
        match try_create_pool(config).await {
            Ok(pool) => {
                tracing::info!(
                    url = %url,
                    max_connections = config.max_connections,
                    min_connections = config.min_connections,
                    attempts = attempt + 1,
                    "database connection pool created"
                );
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    tracing::error!(
                        url = %url,
                        attempts = attempt,
                        error = %e,
                        "failed to connect to database"
                    );
                    return Err(e.into());
                }

                let delay = backoff_delay(config.retry_delay_secs, attempt);
                tracing::warn!(
                    url = %url,
                    attempt,
                    error = %e,
                    "database connection attempt failed, retrying in {:?}",
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

async fn try_create_pool(config: &DatabaseConfig) -> std::result::Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connection_timeout())
        .idle_timeout(Some(config.idle_timeout()))
        .connect(&config.url)
        .await
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("database migrations applied");
    Ok(())
}

/// Delay before retry number `attempt` (1-based)
fn backoff_delay(base_secs: u64, attempt: u32) -> Duration {
    let multiplier = 2_u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_secs(base_secs.saturating_mul(multiplier))
}

/// Replace the password of a connection URL with `***`
fn mask_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };

    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
        None => url.to_string(),
    }
}
