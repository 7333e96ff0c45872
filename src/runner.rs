use tracing::{info, warn};

use crate::record::SINGLETON_ID;
use crate::{AppConfig, AppConfigPatch, ConfigStore, Error};

/// What a run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An existing row was overwritten.
    Updated(Vec<AppConfig>),

    /// The table was empty, a new row was inserted.
    Inserted(Vec<AppConfig>),

    /// The singleton row was written in one atomic statement.
    Upserted(Vec<AppConfig>),
}

impl Outcome {
    /// Rows returned by the service after the write.
    pub fn rows(&self) -> &[AppConfig] {
        match self {
            Outcome::Updated(rows) | Outcome::Inserted(rows) | Outcome::Upserted(rows) => rows,
        }
    }
}

/// A failed write, labelled by the kind of write that was attempted.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Overwriting the existing row failed.
    #[error("Update Error: {0}")]
    Update(#[source] Error),

    /// Inserting a new row failed.
    #[error("Insert Error: {0}")]
    Insert(#[source] Error),

    /// The atomic write failed.
    #[error("Upsert Error: {0}")]
    Upsert(#[source] Error),
}

impl RunError {
    /// Underlying store error.
    pub fn inner(&self) -> &Error {
        match self {
            RunError::Update(e) | RunError::Insert(e) | RunError::Upsert(e) => e,
        }
    }
}

/// Keeps the single `app_config` row up to date.
#[derive(Debug, Clone)]
pub struct Runner<S> {
    store: S,
}

impl<S> Runner<S>
where
    S: ConfigStore,
{
    /// Wrap an already constructed store.
    pub fn new(store: S) -> Self {
        Runner { store }
    }

    /// Store this runner writes to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look up the first row, then update it or insert a new one.
    ///
    /// A failing lookup is logged and treated as an empty table. Note that
    /// nothing guards the gap between the lookup and the write: two runs
    /// racing against an empty table may both insert. Use [`Runner::run_atomic`]
    /// where that matters.
    pub async fn run(&self, patch: &AppConfigPatch) -> Result<Outcome, RunError> {
        let existing = match self.store.first_id().await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "could not look up existing config, falling back to insert");
                None
            }
        };

        match existing {
            Some(id) => {
                info!(id, "found existing config, updating");
                let rows = self.store.update(id, patch).await.map_err(RunError::Update)?;
                info!(rows = rows.len(), "config updated");
                Ok(Outcome::Updated(rows))
            }
            None => {
                info!("no config found, inserting");
                let rows = self.store.insert(patch).await.map_err(RunError::Insert)?;
                info!(rows = rows.len(), "config inserted");
                Ok(Outcome::Inserted(rows))
            }
        }
    }

    /// Write the row pinned to [`SINGLETON_ID`] with a single insert-or-update.
    pub async fn run_atomic(&self, patch: &AppConfigPatch) -> Result<Outcome, RunError> {
        info!(id = SINGLETON_ID, "upserting config");
        let rows = self
            .store
            .upsert(SINGLETON_ID, patch)
            .await
            .map_err(RunError::Upsert)?;
        Ok(Outcome::Upserted(rows))
    }
}
