use sqlx::Connection;

lazy_static::lazy_static! {
    pub(crate) static ref POSTGRES_URL: String = {
        let var_name =
        std::env::var("POSTGRES_PROVIDER")
            .unwrap_or_else(|_| "POSTGRES_URL".to_string());
        std::env::var(var_name)
            .unwrap_or_else(|_| "postgres://localhost:5432".to_string())
    };
}

pub(crate) async fn ad_hoc_sql<I>(stmt: I) -> Result<(), sqlx::Error>
where
    I: IntoIterator<Item = String>,
{
    let mut conn = sqlx::PgConnection::connect(&*POSTGRES_URL).await?;
    let r = sqlx::raw_sql(&stmt.into_iter().collect::<Vec<_>>().join("\n"))
        .execute(&mut conn)
        .await;
    conn.close().await?;
    r.map(|_| ())
}

pub(crate) async fn drop_schema(schema: &str) -> Result<(), sqlx::Error> {
    let stmt = format!("DROP SCHEMA IF EXISTS {} CASCADE", schema);
    ad_hoc_sql([stmt]).await
}

pub(crate) async fn count_rows(schema: &str, table: &str) -> Result<i64, sqlx::Error> {
    let mut conn = sqlx::PgConnection::connect(&*POSTGRES_URL).await?;
    let stmt = format!("SELECT count(*) FROM {schema}.{table}");
    let count: i64 = sqlx::query_scalar(&stmt).fetch_one(&mut conn).await?;
    conn.close().await?;
    Ok(count)
}
