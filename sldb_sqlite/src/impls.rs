use slcore::platform::{
    ACPlatform,
    ConnectorOption,
    PlatformUrl,
};
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::SqlitePoolOptions,
    Sqlite,
};
use std::sync::Arc;

use crate::SqliteBackend;

impl PlatformUrl for SqliteBackend {
    fn url(&self) -> &str {
        self.url.as_ref()
    }
}

fn is_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

impl SqliteBackend {
    pub async fn connect(opts: ConnectorOption) -> Result<SqliteBackend, sqlx::Error> {
        let memory = is_memory(&opts.url);
        if !memory
            && opts.auto_create_db
            && !Sqlite::database_exists(&opts.url).await.unwrap_or(false)
        {
            log::warn!("sqlite database {} does not exist; creating...", &opts.url);
            Sqlite::create_database(&opts.url).await?
        }

        // every connection to an in-memory database is a distinct
        // database, so pin the pool to a single connection that lives
        // for as long as the pool.
        let pool = if memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&opts.url)
                .await?
        } else {
            SqlitePoolOptions::new()
                .connect(&opts.url)
                .await?
        };
        Ok(SqliteBackend {
            pool: Arc::new(pool),
            url: opts.url,
        })
    }

    pub async fn migrate_ac(self) -> Result<Self, sqlx::Error> {
        sqlx::migrate!("migrations/slac").run(&*self.pool).await?;
        Ok(self)
    }

    /// Connect and apply the access control migrations.
    pub async fn ac(
        opts: ConnectorOption,
    ) -> Result<impl ACPlatform, Box<dyn std::error::Error + Send + Sync + 'static>> {
        let backend = SqliteBackend::connect(opts).await
            .map_err(Box::new)?
            .migrate_ac()
            .await
            .map_err(Box::new)?;
        Ok(backend)
    }
}

mod ac;

mod default_impl {
    use slcore::platform::DefaultACPlatform;
    use crate::SqliteBackend;

    impl DefaultACPlatform for SqliteBackend {}
}
