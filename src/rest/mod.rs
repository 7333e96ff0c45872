use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::record::DEFAULT_TABLE;
use crate::settings::{ServiceKey, Settings};
use crate::{AppConfig, AppConfigPatch, ConfigStore, Error};

const RETURN_REPRESENTATION: &str = "return=representation";
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=representation";

#[derive(Debug, Deserialize)]
struct IdRow {
    id: i64,
}

// PostgREST error body, e.g. `{"code":"42P01","message":"relation ... does not exist"}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct WithId<'a> {
    id: i64,
    #[serde(flatten)]
    patch: &'a AppConfigPatch,
}

/// Builder for [`RestClient`].
#[derive(Debug, Clone)]
pub struct RestClientBuilder {
    table: String,
    timeout: Duration,
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        RestClientBuilder {
            table: DEFAULT_TABLE.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl RestClientBuilder {
    /// Table name, `app_config` by default.
    pub fn table<S>(mut self, table: S) -> Self
    where
        S: Into<String>,
    {
        self.table = table.into();
        self
    }

    /// Per-request timeout, 10 seconds by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client for the project described by `settings`.
    pub fn build(self, settings: &Settings) -> Result<RestClient, Error> {
        if self.table.is_empty() || self.table.contains(['/', '?', '#']) {
            return Err(Error::Config {
                msg: "table name must be a single path segment",
            });
        }

        let mut base = settings.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join("rest/v1/")
            .and_then(|u| u.join(&self.table))
            .map_err(|_| Error::Config {
                msg: "cannot derive the REST endpoint from SUPABASE_URL",
            })?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(auth_headers(&settings.service_key)?)
            .build()?;

        debug!(%endpoint, "REST client initialized");
        Ok(RestClient {
            http,
            endpoint,
            table: self.table,
        })
    }
}

fn auth_headers(key: &ServiceKey) -> Result<HeaderMap, Error> {
    let invalid = |_| Error::Config {
        msg: "SUPABASE_SERVICE_ROLE_KEY is not a valid header value",
    };
    let mut apikey = HeaderValue::from_str(key.expose()).map_err(invalid)?;
    apikey.set_sensitive(true);
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", key.expose())).map_err(invalid)?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert("apikey", apikey);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

/// Client for the hosted service's REST table api (PostgREST).
///
/// Every request is authenticated with the service-role key, sent both as
/// the `apikey` header and as a bearer token.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    endpoint: Url,
    table: String,
}

impl RestClient {
    /// Create an instance of [`RestClientBuilder`].
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::default()
    }

    /// Build a client with default options for the project in `settings`.
    pub fn new(settings: &Settings) -> Result<Self, Error> {
        RestClient::builder().build(settings)
    }

    /// Table this client reads and writes.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Full url of the table endpoint, `{base}/rest/v1/{table}`.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send<T>(&self, request: RequestBuilder) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;
        read_body(response).await
    }
}

async fn read_body<T>(response: Response) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let msg = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);
        return Err(Error::Api {
            status: status.as_u16(),
            msg,
        });
    }
    Ok(response.json().await?)
}

impl ConfigStore for RestClient {
    async fn first_id(&self) -> Result<Option<i64>, Error> {
        debug!(table = %self.table, "selecting first config id");
        let request = self
            .http
            .get(self.endpoint.clone())
            .query(&[("select", "id"), ("limit", "1")]);
        let rows: Vec<IdRow> = self.send(request).await?;
        Ok(rows.into_iter().next().map(|r| r.id))
    }

    async fn update(&self, id: i64, patch: &AppConfigPatch) -> Result<Vec<AppConfig>, Error> {
        debug!(table = %self.table, id, "updating config row");
        let request = self
            .http
            .patch(self.endpoint.clone())
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(patch);
        self.send(request).await
    }

    async fn insert(&self, patch: &AppConfigPatch) -> Result<Vec<AppConfig>, Error> {
        debug!(table = %self.table, "inserting config row");
        let request = self
            .http
            .post(self.endpoint.clone())
            .header("Prefer", RETURN_REPRESENTATION)
            .json(patch);
        self.send(request).await
    }

    async fn upsert(&self, id: i64, patch: &AppConfigPatch) -> Result<Vec<AppConfig>, Error> {
        debug!(table = %self.table, id, "upserting config row");
        let request = self
            .http
            .post(self.endpoint.clone())
            .query(&[("on_conflict", "id")])
            .header("Prefer", MERGE_DUPLICATES)
            .json(&WithId { id, patch });
        self.send(request).await
    }

    async fn fetch_all(&self) -> Result<Vec<AppConfig>, Error> {
        let request = self
            .http
            .get(self.endpoint.clone())
            .query(&[("select", "*"), ("order", "id.asc")]);
        self.send(request).await
    }
}
