use crate::sql;
use sqlx::postgres::PgPool;
use tracing::debug;

mod builder;
mod opts;
mod public;

pub use builder::ClientBuilder;

/// Client talking to the PostgreSQL database behind the hosted service.
#[derive(Debug, Clone)]
pub struct Client {
    pool: PgPool,
    opts: opts::ClientOptions,
    stmt: sql::Statements,
}

impl Client {
    async fn new(pool: PgPool, opts: opts::ClientOptions) -> Result<Self, sqlx::Error> {
        let stmt = sql::Statements::for_table(&opts.schema, &opts.table);
        let c = Client { pool, opts, stmt };
        if c.opts.create_table {
            c.install_table().await?;
        }
        Ok(c)
    }

    async fn install_table(&self) -> Result<(), sqlx::Error> {
        debug!(schema = %self.opts.schema, table = %self.opts.table, "installing config table");
        let ddl = sql::install_table(&self.opts.schema, &self.opts.table);
        sqlx::raw_sql(&ddl).execute(&self.pool).await?;
        Ok(())
    }
}
