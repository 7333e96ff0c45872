pub(crate) fn create_schema(schema: &str) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {};", schema)
}

pub(crate) fn create_config_table(schema: &str, table: &str) -> String {
    format!(
        "
        CREATE TABLE IF NOT EXISTS {schema}.{table} (
            id bigint generated by default as identity primary key,
            min_version text not null,
            download_url text not null,
            updated_at timestamp with time zone not null default now()
        );
        "
    )
}
