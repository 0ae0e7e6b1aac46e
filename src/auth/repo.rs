use crate::auth::repo_types::{PersonalAccessToken, User};
use sqlx::SqlitePool;
use time::OffsetDateTime;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a user unless the email is already taken; returns whichever row
    /// owns the email afterwards.
    pub async fn create_or_get(
        db: &SqlitePool,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO users (name, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(OffsetDateTime::now_utc())
        .execute(db)
        .await?;

        User::find_by_email(db, email)
            .await?
            .ok_or_else(|| anyhow::anyhow!("user {email} missing after insert"))
    }
}

impl PersonalAccessToken {
    /// Store a token hash for `user_id` and return the new row id.
    pub async fn create(
        db: &SqlitePool,
        user_id: i64,
        name: &str,
        token_hash: &str,
    ) -> anyhow::Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO personal_access_tokens (user_id, name, token_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(token_hash)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await?;
        Ok(id)
    }

    pub async fn find(db: &SqlitePool, id: i64) -> anyhow::Result<Option<PersonalAccessToken>> {
        let token = sqlx::query_as::<_, PersonalAccessToken>(
            r#"
            SELECT id, user_id, name, token_hash, last_used_at, created_at
            FROM personal_access_tokens
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(token)
    }

    pub async fn touch(db: &SqlitePool, id: i64) -> anyhow::Result<()> {
        sqlx::query("UPDATE personal_access_tokens SET last_used_at = ? WHERE id = ?")
            .bind(OffsetDateTime::now_utc())
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
