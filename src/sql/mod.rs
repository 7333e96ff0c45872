pub(crate) mod ddl;
pub(crate) mod dml;

fn locked<I>(schema: &str, table: &str, stmts: I) -> String
where
    I: IntoIterator<Item = String>,
{
    format!(
        "
        BEGIN;
        SET LOCAL lock_timeout = '30s';
        SET LOCAL idle_in_transaction_session_timeout = '30s';
        SELECT pg_advisory_xact_lock(('x' || encode(sha224((current_database() || '.appconfig.{schema}.{table}')::bytea), 'hex'))::bit(64)::bigint);
        {};
        COMMIT;
        ",
        stmts.into_iter().collect::<Vec<_>>().join("\n"),
    )
}

/// Creates the schema and the config table, serialized with an advisory lock
/// so that concurrently starting clients do not trip over each other.
///
/// ```md
///                         Table "public.app_config"
///     Column    |           Type           | Nullable |             Default
/// --------------+--------------------------+----------+----------------------------------
///  id           | bigint                   | not null | generated by default as identity
///  min_version  | text                     | not null |
///  download_url | text                     | not null |
///  updated_at   | timestamp with time zone | not null | now()
/// ```
pub(crate) fn install_table(schema: &str, table: &str) -> String {
    locked(
        schema,
        table,
        [
            ddl::create_schema(schema),
            ddl::create_config_table(schema, table),
        ],
    )
}

/// Statements compiled once per schema and table.
#[derive(Debug, Clone)]
pub(crate) struct Statements {
    pub(crate) select_first_id: String,
    pub(crate) select_all: String,
    pub(crate) update_config: String,
    pub(crate) insert_config: String,
    pub(crate) upsert_config: String,
}

impl Statements {
    pub(crate) fn for_table(schema: &str, table: &str) -> Self {
        Statements {
            select_first_id: dml::select_first_id(schema, table),
            select_all: dml::select_all(schema, table),
            update_config: dml::update_config(schema, table),
            insert_config: dml::insert_config(schema, table),
            upsert_config: dml::upsert_config(schema, table),
        }
    }
}
