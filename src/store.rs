use std::future::Future;

use crate::{AppConfig, AppConfigPatch, Error};

/// Storage holding the `app_config` table.
///
/// Implemented by the PostgreSQL [`Client`](crate::Client) and the REST
/// [`RestClient`](crate::RestClient).
pub trait ConfigStore {
    /// Identifier of the first row in the table, if any.
    fn first_id(&self) -> impl Future<Output = Result<Option<i64>, Error>> + Send;

    /// Overwrite the row with this `id`, returning the updated rows.
    ///
    /// No rows are returned if nothing matched the `id`.
    fn update(
        &self,
        id: i64,
        patch: &AppConfigPatch,
    ) -> impl Future<Output = Result<Vec<AppConfig>, Error>> + Send;

    /// Insert a new row, returning it.
    fn insert(
        &self,
        patch: &AppConfigPatch,
    ) -> impl Future<Output = Result<Vec<AppConfig>, Error>> + Send;

    /// Insert a row with this `id` or overwrite the existing one in a single write.
    fn upsert(
        &self,
        id: i64,
        patch: &AppConfigPatch,
    ) -> impl Future<Output = Result<Vec<AppConfig>, Error>> + Send;

    /// All rows ordered by `id`.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<AppConfig>, Error>> + Send;
}
