use crate::Error;

/// Hosted project the tool talks to when `SUPABASE_URL` is not set.
pub const DEFAULT_SUPABASE_URL: &str = "https://xzhmdxtzpuxycvsatjoe.supabase.co";

const DEFAULT_POSTGRES_URL: &str = "postgres://localhost:5432";

pub(crate) const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
pub(crate) const SERVICE_ROLE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// Service-role secret.
///
/// Never printed: `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceKey(String);

impl ServiceKey {
    /// Wrap a non-empty secret.
    pub fn new<S>(key: S) -> Result<Self, Error>
    where
        S: Into<String>,
    {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::Config {
                msg: "missing SUPABASE_SERVICE_ROLE_KEY",
            });
        }
        Ok(ServiceKey(key))
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ServiceKey(***)")
    }
}

/// Where the hosted service lives and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base url of the project, e.g. `https://<ref>.supabase.co`.
    pub base_url: url::Url,

    /// Service-role key.
    pub service_key: ServiceKey,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// `SUPABASE_SERVICE_ROLE_KEY` is required, `SUPABASE_URL` falls back
    /// to [`DEFAULT_SUPABASE_URL`].
    pub fn from_env() -> Result<Self, Error> {
        Settings::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_key = lookup(SERVICE_ROLE_KEY_VAR)
            .ok_or(Error::Config {
                msg: "missing SUPABASE_SERVICE_ROLE_KEY",
            })
            .and_then(ServiceKey::new)?;

        let raw_url = lookup(SUPABASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUPABASE_URL.to_string());
        let base_url = url::Url::parse(raw_url.trim()).map_err(|_| Error::Config {
            msg: "SUPABASE_URL is not a valid url",
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config {
                msg: "SUPABASE_URL must use http or https",
            });
        }

        Ok(Settings {
            base_url,
            service_key,
        })
    }
}

/// Address of the PostgreSQL server behind the hosted service.
///
/// `POSTGRES_PROVIDER` names the variable holding the url (`POSTGRES_URL` by default),
/// falling back to `postgres://localhost:5432`.
pub fn database_url<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let var_name = lookup("POSTGRES_PROVIDER").unwrap_or_else(|| "POSTGRES_URL".to_string());
    lookup(&var_name).unwrap_or_else(|| DEFAULT_POSTGRES_URL.to_string())
}
