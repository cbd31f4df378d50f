use async_trait::async_trait;
use slcore::{
    ac::{
        traits::SessionBackend,
        session::{
            Session,
            SessionToken,
        },
    },
    error::BackendError,
};
use sqlx::{
    sqlite::SqliteRow,
    Row,
};
use std::str::FromStr;

use crate::{
    chrono::Utc,
    SqliteBackend,
};

async fn save_session_sqlite(
    backend: &SqliteBackend,
    session: &Session,
) -> Result<i64, BackendError> {
    let last_active_ts = Utc::now().timestamp();
    sqlx::query(
        r#"
INSERT INTO user_session (
    token,
    user_id,
    origin,
    created_ts,
    last_active_ts
)
VALUES ( ?1, ?2, ?3, ?4, ?5 )
ON CONFLICT(token)
DO UPDATE SET
    origin = ?3,
    last_active_ts = ?6
        "#,
    )
    .bind(session.token.as_str())
    .bind(session.user_id)
    .bind(&session.origin)
    .bind(session.created_ts)
    .bind(session.last_active_ts)
    .bind(last_active_ts)
    .execute(&*backend.pool)
    .await?;
    Ok(last_active_ts)
}

async fn load_session_sqlite(
    backend: &SqliteBackend,
    token: &SessionToken,
) -> Result<Option<Session>, BackendError> {
    let session = sqlx::query(
        r#"
SELECT
    token,
    user_id,
    origin,
    created_ts,
    last_active_ts
FROM user_session
WHERE token = ?1
        "#,
    )
    .bind(token.as_str())
    .try_map(|row: SqliteRow| {
        let token: String = row.try_get("token")?;
        Ok(Session {
            token: SessionToken::from_str(&token)
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
            user_id: row.try_get("user_id")?,
            origin: row.try_get("origin")?,
            created_ts: row.try_get("created_ts")?,
            last_active_ts: row.try_get("last_active_ts")?,
        })
    })
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(session)
}

async fn purge_session_sqlite(
    backend: &SqliteBackend,
    token: &SessionToken,
) -> Result<(), BackendError> {
    sqlx::query(
        r#"
DELETE FROM
    user_session
WHERE
    token = ?1
        "#,
    )
    .bind(token.as_str())
    .execute(&*backend.pool)
    .await?;
    Ok(())
}

async fn get_user_sessions_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
) -> Result<Vec<Session>, BackendError> {
    let sessions = sqlx::query(
        r#"
SELECT
    user_id,
    origin,
    created_ts,
    last_active_ts
FROM user_session
WHERE user_id = ?1
ORDER BY created_ts, rowid
        "#,
    )
    .bind(user_id)
    .try_map(|row: SqliteRow| Ok(Session {
        token: SessionToken::default(),
        user_id: row.try_get("user_id")?,
        origin: row.try_get("origin")?,
        created_ts: row.try_get("created_ts")?,
        last_active_ts: row.try_get("last_active_ts")?,
    }))
    .fetch_all(&*backend.pool)
    .await?;
    Ok(sessions)
}

async fn purge_user_sessions_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
    keep: Option<SessionToken>,
) -> Result<(), BackendError> {
    let mut builder = sqlx::QueryBuilder::new(r#"
DELETE FROM
    user_session
WHERE user_id = "#);
    builder.push_bind(user_id);
    if let Some(token) = keep {
        builder.push(" AND token != ");
        builder.push_bind(token.to_string());
    }
    builder.build()
        .execute(&*backend.pool)
        .await?;
    Ok(())
}

#[async_trait]
impl SessionBackend for SqliteBackend {
    async fn save_session(
        &self,
        session: &Session,
    ) -> Result<i64, BackendError> {
        save_session_sqlite(self, session).await
    }

    async fn load_session(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, BackendError> {
        load_session_sqlite(self, token).await
    }

    async fn purge_session(
        &self,
        token: &SessionToken,
    ) -> Result<(), BackendError> {
        purge_session_sqlite(self, token).await
    }

    async fn get_user_sessions(
        &self,
        user_id: i64,
    ) -> Result<Vec<Session>, BackendError> {
        get_user_sessions_sqlite(self, user_id).await
    }

    async fn purge_user_sessions(
        &self,
        user_id: i64,
        keep: Option<SessionToken>,
    ) -> Result<(), BackendError> {
        purge_user_sessions_sqlite(self, user_id, keep).await
    }
}

#[cfg(test)]
mod testing {
    use slcore::{
        ac::{
            session::{
                SessionFactory,
                SessionTokenFactory,
            },
            traits::UserBackend,
        },
        platform::ConnectorOption,
    };
    use test_sl::{
        chrono::{
            Utc,
            set_timestamp,
        },
        rand::MockRng,
    };

    use super::*;

    #[tokio::test]
    async fn test_basic() -> anyhow::Result<()> {
        let backend = SqliteBackend::connect(ConnectorOption::from("sqlite::memory:"))
            .await?
            .migrate_ac()
            .await?;
        let user_id = UserBackend::add_user(&backend, "karina", "Karina").await?;
        let purge_id = UserBackend::add_user(&backend, "purge_tester", "Purge").await?;
        let session_factory = SessionFactory::new()
            .token_factory(
                SessionTokenFactory::new()
                    .rng(MockRng::default())
            )
            .ts_source(|| Utc::now().timestamp());

        let session = session_factory.create(user_id, "localhost");
        SessionBackend::save_session(&backend, &session).await?;
        let stored = SessionBackend::load_session(&backend, &session.token).await?
            .expect("session was saved");
        assert_eq!(session, stored);

        set_timestamp(1888777666);
        let ts = SessionBackend::save_session(&backend, &stored).await?;
        assert_eq!(ts, 1888777666);
        let updated = SessionBackend::load_session(&backend, &session.token).await?
            .expect("session was saved");
        assert_eq!(updated.last_active_ts, ts);
        assert_eq!(updated.created_ts, session.created_ts);

        let unknown = SessionToken::from_str("validtoken123")?;
        assert_eq!(SessionBackend::load_session(&backend, &unknown).await?, None);

        SessionBackend::save_session(
            &backend,
            &session_factory.create(user_id, "localhost"),
        ).await?;
        let purge = session_factory.create(purge_id, "localhost");
        SessionBackend::save_session(&backend, &purge).await?;
        assert_eq!(2, SessionBackend::get_user_sessions(&backend, user_id).await?.len());

        let keep = session_factory.create(user_id, "localhost");
        SessionBackend::save_session(&backend, &keep).await?;
        let sessions = SessionBackend::get_user_sessions(&backend, user_id).await?;
        assert_eq!(3, sessions.len());
        assert!(sessions.iter().all(|s| s.token.is_redacted()));

        SessionBackend::purge_user_sessions(&backend, user_id, Some(keep.token.clone())).await?;
        assert_eq!(1, SessionBackend::get_user_sessions(&backend, user_id).await?.len());
        assert!(SessionBackend::load_session(&backend, &keep.token).await?.is_some());

        assert!(SessionBackend::load_session(&backend, &purge.token).await?.is_some());
        SessionBackend::purge_session(&backend, &purge.token).await?;
        assert!(SessionBackend::load_session(&backend, &purge.token).await?.is_none());

        SessionBackend::purge_user_sessions(&backend, user_id, None).await?;
        assert_eq!(0, SessionBackend::get_user_sessions(&backend, user_id).await?.len());
        Ok(())
    }
}
