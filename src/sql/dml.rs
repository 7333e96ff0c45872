pub(crate) fn select_first_id(schema: &str, table: &str) -> String {
    format!("SELECT id FROM {schema}.{table} LIMIT 1;")
}

pub(crate) fn select_all(schema: &str, table: &str) -> String {
    format!(
        "
        SELECT id, min_version, download_url, updated_at
        FROM {schema}.{table}
        ORDER BY id;
        "
    )
}

pub(crate) fn update_config(schema: &str, table: &str) -> String {
    format!(
        "
        UPDATE {schema}.{table}
        SET
            min_version = $2,
            download_url = $3,
            updated_at = $4
        WHERE id = $1
        RETURNING id, min_version, download_url, updated_at;
        "
    )
}

pub(crate) fn insert_config(schema: &str, table: &str) -> String {
    format!(
        "
        INSERT INTO {schema}.{table} (min_version, download_url, updated_at)
        VALUES ($1, $2, $3)
        RETURNING id, min_version, download_url, updated_at;
        "
    )
}

// The explicit id bypasses the identity sequence, so it is only ever
// used with the singleton marker.
pub(crate) fn upsert_config(schema: &str, table: &str) -> String {
    format!(
        "
        INSERT INTO {schema}.{table} (id, min_version, download_url, updated_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE
        SET
            min_version = EXCLUDED.min_version,
            download_url = EXCLUDED.download_url,
            updated_at = EXCLUDED.updated_at
        RETURNING id, min_version, download_url, updated_at;
        "
    )
}
