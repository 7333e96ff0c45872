use super::super::Client;
use crate::{AppConfig, AppConfigPatch, ConfigStore, Error};
use tracing::debug;

impl Client {
    /// Schema-qualified name of the config table.
    pub fn table_name(&self) -> String {
        format!("{}.{}", self.opts.schema, self.opts.table)
    }
}

fn map_write_error(e: sqlx::Error) -> Error {
    if let Some(db_error) = e.as_database_error() {
        if db_error.is_unique_violation() {
            return Error::Conflict {
                msg: "config row with this id already exists",
            };
        }
    }
    Error::Sqlx(e)
}

impl ConfigStore for Client {
    async fn first_id(&self) -> Result<Option<i64>, Error> {
        debug!(table = %self.table_name(), "selecting first config id");
        let id: Option<i64> = sqlx::query_scalar(&self.stmt.select_first_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, patch: &AppConfigPatch) -> Result<Vec<AppConfig>, Error> {
        debug!(table = %self.table_name(), id, "updating config row");
        let rows: Vec<AppConfig> = sqlx::query_as(&self.stmt.update_config)
            .bind(id)
            .bind(&patch.min_version)
            .bind(&patch.download_url)
            .bind(patch.updated_at)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, patch: &AppConfigPatch) -> Result<Vec<AppConfig>, Error> {
        debug!(table = %self.table_name(), "inserting config row");
        let rows: Vec<AppConfig> = sqlx::query_as(&self.stmt.insert_config)
            .bind(&patch.min_version)
            .bind(&patch.download_url)
            .bind(patch.updated_at)
            .fetch_all(&self.pool)
            .await
            .map_err(map_write_error)?;
        Ok(rows)
    }

    async fn upsert(&self, id: i64, patch: &AppConfigPatch) -> Result<Vec<AppConfig>, Error> {
        debug!(table = %self.table_name(), id, "upserting config row");
        let rows: Vec<AppConfig> = sqlx::query_as(&self.stmt.upsert_config)
            .bind(id)
            .bind(&patch.min_version)
            .bind(&patch.download_url)
            .bind(patch.updated_at)
            .fetch_all(&self.pool)
            .await
            .map_err(map_write_error)?;
        Ok(rows)
    }

    async fn fetch_all(&self) -> Result<Vec<AppConfig>, Error> {
        let rows: Vec<AppConfig> = sqlx::query_as(&self.stmt.select_all)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
