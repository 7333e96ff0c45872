use sqlx::postgres::PgPool;

use super::{opts, Client};
use crate::utils;
use crate::Error;

/// Builder for [`Client`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    opts: opts::ClientOptions,
}

impl ClientBuilder {
    /// Schema name, `public` by default.
    pub fn schema<S>(mut self, schema: S) -> Self
    where
        S: Into<String>,
    {
        self.opts.schema = schema.into();
        self
    }

    /// Table name, `app_config` by default.
    pub fn table<S>(mut self, table: S) -> Self
    where
        S: Into<String>,
    {
        self.opts.table = table.into();
        self
    }

    /// Whether to create the schema and the table on connect (default).
    ///
    /// Turn this off when the table is managed by migrations elsewhere.
    pub fn create_table(mut self, create_table: bool) -> Self {
        self.opts.create_table = create_table;
        self
    }

    // Schema and table are spliced into the statements, so only plain
    // identifiers are allowed: `[A-Za-z_][A-Za-z0-9_]*`.
    fn check_identifiers(&self) -> Result<(), Error> {
        if !is_identifier(&self.opts.schema) {
            return Err(Error::Config {
                msg: "schema must be a plain SQL identifier",
            });
        }
        if !is_identifier(&self.opts.table) {
            return Err(Error::Config {
                msg: "table must be a plain SQL identifier",
            });
        }
        Ok(())
    }

    /// Connect to the PostgreSQL server.
    pub async fn connect(self) -> Result<Client, Error> {
        self.check_identifiers()?;
        let pool = utils::create_pool(None).await?;
        self.with_pool(pool).await
    }

    /// Connect to the PostgreSQL server using specific url.
    ///
    /// To configure `ssl` (e.g. `sslmode=require`), you will need to build
    /// your own `Pool` and use [`ClientBuilder::with_pool`] method instead.
    pub async fn connect_to<S>(self, url: S) -> Result<Client, Error>
    where
        S: AsRef<str>,
    {
        self.check_identifiers()?;
        let pool = utils::create_pool(Some(url.as_ref())).await?;
        self.with_pool(pool).await
    }

    /// Bring your own pool.
    pub async fn with_pool(self, pool: PgPool) -> Result<Client, Error> {
        self.check_identifiers()?;
        Ok(Client::new(pool, self.opts).await?)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
