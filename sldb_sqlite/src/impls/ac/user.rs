use async_trait::async_trait;
use slcore::{
    ac::{
        role::Role,
        traits::UserBackend,
        user::User,
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

const SELECT_USER: &str = r#"
SELECT
    id,
    username,
    name,
    avatar,
    role,
    is_admin,
    created_ts
FROM
    'user'
"#;

fn user_from_row(row: SqliteRow) -> Result<User, sqlx::Error> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        name: row.try_get("name")?,
        avatar: row.try_get("avatar")?,
        // unknown values degrade to the least privileged role
        role: Role::from_str(&role).unwrap_or_default(),
        is_admin: row.try_get("is_admin")?,
        created_ts: row.try_get("created_ts")?,
    })
}

async fn add_user_sqlite(
    backend: &SqliteBackend,
    username: &str,
    name: &str,
) -> Result<i64, BackendError> {
    let ts = Utc::now().timestamp();
    let id = sqlx::query(
        r#"
INSERT INTO 'user' (
    username,
    name,
    created_ts
)
VALUES ( ?1, ?2, ?3 )
        "#,
    )
    .bind(username)
    .bind(name)
    .bind(ts)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_user_by_id_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<User>, BackendError> {
    let user = sqlx::query(&format!("{SELECT_USER} WHERE id = ?1"))
        .bind(id)
        .try_map(user_from_row)
        .fetch_optional(&*backend.pool)
        .await?;
    Ok(user)
}

async fn get_user_by_name_sqlite(
    backend: &SqliteBackend,
    username: &str,
) -> Result<Option<User>, BackendError> {
    let user = sqlx::query(&format!("{SELECT_USER} WHERE username = ?1"))
        .bind(username)
        .try_map(user_from_row)
        .fetch_optional(&*backend.pool)
        .await?;
    Ok(user)
}

async fn list_users_sqlite(
    backend: &SqliteBackend,
) -> Result<Vec<User>, BackendError> {
    let users = sqlx::query(&format!("{SELECT_USER} ORDER BY id"))
        .try_map(user_from_row)
        .fetch_all(&*backend.pool)
        .await?;
    Ok(users)
}

async fn set_user_role_sqlite(
    backend: &SqliteBackend,
    id: i64,
    role: Role,
) -> Result<bool, BackendError> {
    let rows_affected = sqlx::query(
        r#"
UPDATE 'user'
SET
    role = ?2
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .bind(role.to_string())
    .execute(&*backend.pool)
    .await?
    .rows_affected();
    Ok(rows_affected > 0)
}

async fn set_user_admin_sqlite(
    backend: &SqliteBackend,
    id: i64,
    is_admin: bool,
) -> Result<bool, BackendError> {
    let rows_affected = sqlx::query(
        r#"
UPDATE 'user'
SET
    is_admin = ?2
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .bind(is_admin)
    .execute(&*backend.pool)
    .await?
    .rows_affected();
    Ok(rows_affected > 0)
}

async fn store_user_password_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
    password: &str,
) -> Result<i64, BackendError> {
    let ts = Utc::now().timestamp();
    let id = sqlx::query(
        r#"
INSERT INTO user_password (
    user_id,
    password,
    created_ts
)
VALUES ( ?1, ?2, ?3 )
        "#,
    )
    .bind(user_id)
    .bind(password)
    .bind(ts)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_user_password_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
) -> Result<String, BackendError> {
    // id breaks ties for passwords stored within the same second.
    let result = sqlx::query(
        r#"
SELECT
    password
FROM
    user_password
WHERE
    user_id = ?1
ORDER BY created_ts DESC, id DESC
        "#,
    )
    .bind(user_id)
    .try_map(|row: SqliteRow| row.try_get::<String, _>("password"))
    .fetch_one(&*backend.pool)
    .await?;
    Ok(result)
}

async fn purge_user_passwords_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
) -> Result<(), BackendError> {
    sqlx::query(
        r#"
DELETE FROM
    user_password
WHERE
    user_id = ?1
        "#,
    )
    .bind(user_id)
    .execute(&*backend.pool)
    .await?;
    Ok(())
}

#[async_trait]
impl UserBackend for SqliteBackend {
    async fn add_user(
        &self,
        username: &str,
        name: &str,
    ) -> Result<i64, BackendError> {
        add_user_sqlite(self, username, name).await
    }

    async fn get_user_by_id(
        &self,
        id: i64,
    ) -> Result<Option<User>, BackendError> {
        get_user_by_id_sqlite(self, id).await
    }

    async fn get_user_by_name(
        &self,
        username: &str,
    ) -> Result<Option<User>, BackendError> {
        get_user_by_name_sqlite(self, username).await
    }

    async fn list_users(
        &self,
    ) -> Result<Vec<User>, BackendError> {
        list_users_sqlite(self).await
    }

    async fn set_user_role(
        &self,
        id: i64,
        role: Role,
    ) -> Result<bool, BackendError> {
        set_user_role_sqlite(self, id, role).await
    }

    async fn set_user_admin(
        &self,
        id: i64,
        is_admin: bool,
    ) -> Result<bool, BackendError> {
        set_user_admin_sqlite(self, id, is_admin).await
    }

    async fn store_user_password(
        &self,
        user_id: i64,
        password: &str,
    ) -> Result<i64, BackendError> {
        store_user_password_sqlite(self, user_id, password).await
    }

    async fn get_user_password(
        &self,
        user_id: i64,
    ) -> Result<String, BackendError> {
        get_user_password_sqlite(self, user_id).await
    }

    async fn purge_user_passwords(
        &self,
        user_id: i64,
    ) -> Result<(), BackendError> {
        purge_user_passwords_sqlite(self, user_id).await
    }
}
