use crate::utils::{self, POSTGRES_URL};
use appconfig::{Client, ConfigStore, Error};
use sqlx::postgres::PgPoolOptions;

#[tokio::test]
async fn connect_to() {
    let local = "appconfig_connect_to";
    utils::drop_schema(local).await.unwrap();

    let c = Client::builder()
        .schema(local)
        .connect_to(POSTGRES_URL.as_str())
        .await
        .unwrap();
    assert_eq!(c.table_name(), "appconfig_connect_to.app_config");
    assert_eq!(c.first_id().await.unwrap(), None);

    utils::drop_schema(local).await.unwrap();
}

// On CI - when running against a postgres service with TLS enabled - use '--include-ignored'
// to run this test.
#[ignore = "this test requires a dedicated test run against PostgreSQL server with TLS enabled"]
#[tokio::test]
async fn bring_your_own_pool() {
    let local = "appconfig_bring_your_own_pool";
    let url = format!("{}?sslmode=require", POSTGRES_URL.as_str());
    let p = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .unwrap();
    let _c = Client::builder().schema(local).with_pool(p).await.unwrap();
    utils::drop_schema(local).await.unwrap();
}

#[tokio::test]
async fn instantiated_idempotently() {
    let local = "appconfig_instantiated_idempotently";
    utils::drop_schema(local).await.unwrap();

    // as if N replicas are running the tool at the same time
    let mut js = tokio::task::JoinSet::new();
    for _ in 0..20 {
        js.spawn(async move {
            Client::builder().schema(local).connect().await.unwrap();
        });
    }

    while let Some(res) = js.join_next().await {
        res.unwrap()
    }

    assert_eq!(utils::count_rows(local, "app_config").await.unwrap(), 0);
    utils::drop_schema(local).await.unwrap();
}

#[tokio::test]
async fn existing_table_is_left_alone() {
    let local = "appconfig_existing_table";
    utils::drop_schema(local).await.unwrap();
    utils::ad_hoc_sql([
        format!("CREATE SCHEMA {local};"),
        format!(
            "CREATE TABLE {local}.settings (
                id bigint primary key,
                min_version text not null,
                download_url text not null,
                updated_at timestamptz not null default now()
            );"
        ),
        format!(
            "INSERT INTO {local}.settings VALUES (5, '1.0.0', 'https://example.com/a.apk', now());"
        ),
    ])
    .await
    .unwrap();

    let c = Client::builder()
        .schema(local)
        .table("settings")
        .create_table(false)
        .connect()
        .await
        .unwrap();
    assert_eq!(c.first_id().await.unwrap(), Some(5));

    utils::drop_schema(local).await.unwrap();
}

#[tokio::test]
async fn missing_table_surfaces_driver_error() {
    let local = "appconfig_missing_table";
    utils::drop_schema(local).await.unwrap();

    let c = Client::builder()
        .schema(local)
        .create_table(false)
        .connect()
        .await
        .unwrap();
    let err = c.first_id().await.unwrap_err();
    assert!(matches!(err, Error::Sqlx(_)));
}
