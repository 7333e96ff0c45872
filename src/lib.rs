//! Keeps the singleton `app_config` row (minimum supported app version and
//! download url) up to date in a hosted database.
//!
//! Two stores are provided: [`RestClient`] for the hosted REST table api and
//! [`Client`] for a direct PostgreSQL connection. Both are driven by a [`Runner`].
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use appconfig::{AppConfigPatch, RestClient, Runner, Settings};
//!
//! let store = RestClient::new(&Settings::from_env()?)?;
//! let patch = AppConfigPatch::builder().min_version("9.5.0").build()?;
//! let outcome = Runner::new(store).run(&patch).await?;
//! println!("{:?}", outcome.rows());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod record;
mod rest;
mod runner;
mod settings;
mod sql;
mod store;
mod utils;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use record::{
    AppConfig, AppConfigPatch, AppConfigPatchBuilder, DEFAULT_DOWNLOAD_URL, DEFAULT_MIN_VERSION,
    DEFAULT_TABLE, SINGLETON_ID,
};
pub use rest::{RestClient, RestClientBuilder};
pub use runner::{Outcome, RunError, Runner};
pub use settings::{database_url, ServiceKey, Settings, DEFAULT_SUPABASE_URL};
pub use store::ConfigStore;
