use sldb_sqlite::SqliteBackend;

/// An in-memory SQLite backend with the access control schema applied.
pub async fn create_sqlite_backend() -> anyhow::Result<SqliteBackend> {
    Ok(SqliteBackend::connect("sqlite::memory:".into())
        .await?
        .migrate_ac()
        .await?)
}
