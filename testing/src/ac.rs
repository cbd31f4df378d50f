use slac::platform::{
    Builder,
    Platform,
};

use crate::model::create_sqlite_backend;

pub async fn create_sqlite_platform(purge: bool) -> anyhow::Result<Platform> {
    let platform = Builder::new()
        .ac_platform(create_sqlite_backend().await?)
        .password_autopurge(purge)
        .build()?;
    Ok(platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn smoke_test_create_platform() -> anyhow::Result<()> {
        create_sqlite_platform(true).await?;
        create_sqlite_platform(false).await?;
        Ok(())
    }
}
