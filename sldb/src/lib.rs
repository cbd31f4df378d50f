//! Selects and connects the storage backend for a connection string.

use slcore::platform::{ACPlatform, ConnectorOption};
#[cfg(feature = "sqlite")]
use sldb_sqlite::SqliteBackend;
use std::sync::Arc;
use thiserror::Error;

pub struct Backend;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("The connection string {0:?} is unsupported.")]
    Unsupported(String),
    #[error("The feature {0:?} must be enabled for sldb in order to connect to {1:?}")]
    Disabled(&'static str, String),
}

/// The storage engine named by the scheme of a connection string.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Scheme {
    Sqlite,
}

impl Scheme {
    fn name(self) -> &'static str {
        match self {
            Scheme::Sqlite => "sqlite",
        }
    }

    fn of(url: &str) -> Result<Self, Error> {
        match url.split_once(':').map(|(scheme, _)| scheme) {
            Some("sqlite") => Ok(Scheme::Sqlite),
            _ => Err(Error::Unsupported(url.to_string())),
        }
    }
}

impl Backend {
    /// Connect to the access control platform at `url`, creating the
    /// underlying database where it does not exist yet.
    pub async fn ac(
        url: impl ToString + Send,
    ) -> Result<Arc<dyn ACPlatform>, Box<dyn std::error::Error + Send + Sync + 'static>> {
        let url = url.to_string();
        let scheme = Scheme::of(&url)?;
        log::debug!("connecting to the {} access control platform", scheme.name());
        let opts = ConnectorOption::from(url).auto_create_db(true);
        match scheme {
            #[cfg(feature = "sqlite")]
            Scheme::Sqlite => Ok(Arc::new(SqliteBackend::ac(opts).await?)),
            #[cfg(not(feature = "sqlite"))]
            scheme => Err(Box::new(Error::Disabled(scheme.name(), opts.url))),
        }
    }
}
