use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::Error;

/// Name of the table holding the app configuration.
pub const DEFAULT_TABLE: &str = "app_config";

/// Identifier the atomic upsert pins the configuration row to.
pub const SINGLETON_ID: i64 = 1;

/// Minimum app version written when none is given.
pub const DEFAULT_MIN_VERSION: &str = "9.5.0";

/// Download url written when none is given.
pub const DEFAULT_DOWNLOAD_URL: &str = "https://voo-ward-ussd.onrender.com/voo-citizen-v9.5.0.apk";

/// A row of the `app_config` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AppConfig {
    /// Identifier assigned by the storage layer.
    pub id: i64,

    /// Oldest app version that is still allowed to run.
    pub min_version: String,

    /// Where the current build can be downloaded from.
    pub download_url: String,

    /// When the row was last written.
    pub updated_at: DateTime<Utc>,
}

/// Field set written on both update and insert.
///
/// Use [`AppConfigPatch::builder`] to get one; the builder validates
/// the fields before handing the patch out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfigPatch {
    pub(crate) min_version: String,
    pub(crate) download_url: String,
    pub(crate) updated_at: DateTime<Utc>,
}

impl AppConfigPatch {
    /// Create an instance of [`AppConfigPatchBuilder`].
    pub fn builder() -> AppConfigPatchBuilder {
        AppConfigPatchBuilder::default()
    }

    /// Minimum app version.
    pub fn min_version(&self) -> &str {
        &self.min_version
    }

    /// Download url.
    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    /// Timestamp stamped onto the row.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check the fields, same rules as [`AppConfigPatchBuilder::build`].
    pub fn validate(&self) -> Result<(), Error> {
        validate_version(&self.min_version)?;
        validate_download_url(&self.download_url)
    }
}

/// Builder for [`AppConfigPatch`].
#[derive(Debug, Clone)]
pub struct AppConfigPatchBuilder {
    min_version: String,
    download_url: String,
    updated_at: Option<DateTime<Utc>>,
}

impl Default for AppConfigPatchBuilder {
    fn default() -> Self {
        AppConfigPatchBuilder {
            min_version: DEFAULT_MIN_VERSION.to_string(),
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            updated_at: None,
        }
    }
}

impl AppConfigPatchBuilder {
    /// Minimum app version, e.g. `9.5.0`.
    pub fn min_version<S>(mut self, min_version: S) -> Self
    where
        S: Into<String>,
    {
        self.min_version = min_version.into();
        self
    }

    /// Absolute `http(s)` url of the build.
    pub fn download_url<S>(mut self, download_url: S) -> Self
    where
        S: Into<String>,
    {
        self.download_url = download_url.into();
        self
    }

    /// Pin the timestamp. Defaults to the moment [`AppConfigPatchBuilder::build`] is called.
    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Validate the fields and build the patch.
    pub fn build(self) -> Result<AppConfigPatch, Error> {
        let patch = AppConfigPatch {
            min_version: self.min_version.trim().to_string(),
            download_url: self.download_url.trim().to_string(),
            updated_at: self.updated_at.unwrap_or_else(Utc::now),
        };
        patch.validate()?;
        Ok(patch)
    }
}

fn validate_version(version: &str) -> Result<(), Error> {
    semver::Version::parse(version)
        .map(|_| ())
        .map_err(|e| Error::Invalid {
            field: "min_version",
            msg: format!("{e}: {version:?}"),
        })
}

fn validate_download_url(download_url: &str) -> Result<(), Error> {
    let parsed = url::Url::parse(download_url).map_err(|e| Error::Invalid {
        field: "download_url",
        msg: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Invalid {
            field: "download_url",
            msg: format!("unsupported scheme {:?}", parsed.scheme()),
        });
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(Error::Invalid {
            field: "download_url",
            msg: "missing host".to_string(),
        });
    }
    Ok(())
}
