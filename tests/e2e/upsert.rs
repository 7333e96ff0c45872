use crate::utils;
use appconfig::{AppConfigPatch, Client, ConfigStore, Error, Outcome, RunError, Runner, SINGLETON_ID};
use chrono::{Duration, Utc};

fn patch(version: &str) -> AppConfigPatch {
    AppConfigPatch::builder()
        .min_version(version)
        .download_url(format!("https://example.com/app-{version}.apk"))
        .build()
        .unwrap()
}

#[tokio::test]
async fn first_run_inserts_single_row() {
    let local = "appconfig_first_run_inserts";
    utils::drop_schema(local).await.unwrap();

    let c = Client::builder().schema(local).connect().await.unwrap();
    let runner = Runner::new(c);

    let before = Utc::now() - Duration::seconds(1);
    let outcome = runner.run(&AppConfigPatch::builder().build().unwrap()).await.unwrap();
    let after = Utc::now() + Duration::seconds(1);

    let Outcome::Inserted(rows) = outcome else {
        panic!("expected an insert")
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].min_version, "9.5.0");
    assert_eq!(
        rows[0].download_url,
        "https://voo-ward-ussd.onrender.com/voo-citizen-v9.5.0.apk"
    );
    assert!(rows[0].updated_at > before && rows[0].updated_at < after);
    assert_eq!(utils::count_rows(local, "app_config").await.unwrap(), 1);

    utils::drop_schema(local).await.unwrap();
}

#[tokio::test]
async fn second_run_updates_same_row() {
    let local = "appconfig_second_run_updates";
    utils::drop_schema(local).await.unwrap();

    let c = Client::builder().schema(local).connect().await.unwrap();
    let runner = Runner::new(c);

    let first = runner.run(&patch("9.4.0")).await.unwrap();
    let second = runner.run(&patch("9.5.0")).await.unwrap();
    assert!(matches!(first, Outcome::Inserted(_)));
    assert!(matches!(second, Outcome::Updated(_)));
    assert_eq!(first.rows()[0].id, second.rows()[0].id);

    let rows = runner.store().fetch_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].min_version, "9.5.0");
    assert_eq!(rows[0].download_url, "https://example.com/app-9.5.0.apk");
    assert!(rows[0].updated_at >= first.rows()[0].updated_at);

    utils::drop_schema(local).await.unwrap();
}

#[tokio::test]
async fn update_of_vanished_row_returns_nothing() {
    let local = "appconfig_update_vanished";
    utils::drop_schema(local).await.unwrap();

    let c = Client::builder().schema(local).connect().await.unwrap();
    let rows = c.update(12345, &patch("9.5.0")).await.unwrap();
    assert!(rows.is_empty());

    utils::drop_schema(local).await.unwrap();
}

#[tokio::test]
async fn atomic_runs_converge_on_singleton() {
    let local = "appconfig_atomic_runs";
    utils::drop_schema(local).await.unwrap();

    let c = Client::builder().schema(local).connect().await.unwrap();

    let mut js = tokio::task::JoinSet::new();
    for minor in 0..10 {
        let c = c.clone();
        js.spawn(async move {
            Runner::new(c)
                .run_atomic(&patch(&format!("9.{minor}.0")))
                .await
                .unwrap()
        });
    }
    while let Some(res) = js.join_next().await {
        assert!(matches!(res.unwrap(), Outcome::Upserted(_)));
    }

    let rows = c.fetch_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, SINGLETON_ID);

    utils::drop_schema(local).await.unwrap();
}

#[tokio::test]
async fn insert_colliding_with_singleton_is_a_conflict() {
    let local = "appconfig_insert_conflict";
    utils::drop_schema(local).await.unwrap();

    let c = Client::builder().schema(local).connect().await.unwrap();
    let runner = Runner::new(c.clone());
    runner.run_atomic(&patch("9.5.0")).await.unwrap();

    // the identity sequence has not moved past the pinned id yet
    let err = c.insert(&patch("9.6.0")).await.unwrap_err();
    if let Error::Conflict { msg } = err {
        assert_eq!(msg, "config row with this id already exists");
    } else {
        unreachable!()
    }

    // while the checked path keeps updating the pinned row
    let outcome = runner.run(&patch("9.6.0")).await.unwrap();
    assert!(matches!(outcome, Outcome::Updated(_)));
    assert_eq!(outcome.rows()[0].id, SINGLETON_ID);

    utils::drop_schema(local).await.unwrap();
}

#[tokio::test]
async fn write_errors_are_labelled() {
    let local = "appconfig_write_errors";
    utils::drop_schema(local).await.unwrap();

    let c = Client::builder().schema(local).connect().await.unwrap();
    utils::ad_hoc_sql([format!("DROP TABLE {local}.app_config;")])
        .await
        .unwrap();

    // lookup fails too, so the runner falls through to insert
    let err = Runner::new(c).run(&patch("9.5.0")).await.unwrap_err();
    assert!(matches!(err, RunError::Insert(Error::Sqlx(_))));

    utils::drop_schema(local).await.unwrap();
}
