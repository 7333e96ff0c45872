use super::super::{builder::ClientBuilder, Client};
use crate::Error;
use sqlx::postgres::PgPool;

impl Client {
    /// Create an instance of [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create new [`Client`] and connect to a PostgreSQL server.
    ///
    /// If `url` is not given, `POSTGRES_PROVIDER` is read to get the name of the environment variable
    /// to get the address from (defaults to `POSTGRES_URL`), and then that environment variable is read
    /// to get the server address. If the latter environment variable is not defined, the connection will be
    /// made to `postgres://localhost:5432`.
    ///
    /// You can optionally use [`Client::connect_to`] and pass the `url` as an argument.
    pub async fn connect() -> Result<Client, Error> {
        Client::builder().connect().await
    }

    /// Connect to the PostgreSQL server using specific url.
    ///
    /// To configure `ssl` (e.g. `sslmode=require`), you will need to build
    /// your own `Pool` and use [`ClientBuilder::with_pool`] method instead.
    pub async fn connect_to<U>(url: U) -> Result<Client, Error>
    where
        U: AsRef<str>,
    {
        Client::builder().connect_to(url).await
    }

    /// Bring your own pool.
    pub async fn with_pool(pool: PgPool) -> Result<Self, Error> {
        Client::builder().with_pool(pool).await
    }
}
