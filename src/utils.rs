use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

/// A run issues a handful of sequential statements, a small pool is plenty.
const MAX_CONNECTIONS: u32 = 4;

pub(crate) async fn create_pool(url: Option<&str>) -> Result<PgPool, sqlx::Error> {
    let url = match url {
        Some(url) => url.to_string(),
        None => crate::settings::database_url(|name| std::env::var(name).ok()),
    };
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&url)
        .await
}
