//! # UserRepository
//!
//! `users` テーブルの永続化を担当するリポジトリ。
//!
//! 一意性（`users_name_key` / `users_email_key`）は DB の UNIQUE 制約が担保する。
//! 制約違反は [`InfraError`] のまま返し、Conflict への変換はユースケース層で行う。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use healthtrack_domain::user::{NewUser, User, UserId, UserPatch};
use sqlx::PgPool;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを挿入し、採番された `id` と `created_at` を含むユーザーを返す
    async fn insert(&self, new_user: &NewUser) -> Result<User, InfraError>;

    /// ID でユーザーを検索する
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError>;

    /// 名前またはメールアドレスが一致するユーザーを検索する（重複の事前チェック用）
    async fn find_by_name_or_email(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, InfraError>;

    /// 指定されたフィールドのみ更新する
    ///
    /// 該当ユーザーが存在しない場合は `None`。
    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<Option<User>, InfraError>;

    /// ユーザーを削除し、削除した行を返す
    ///
    /// エントリーは外部キーの `ON DELETE CASCADE` で同時に削除される。
    async fn delete(&self, id: UserId) -> Result<Option<User>, InfraError>;
}

/// `users` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id:         i64,
    name:       String,
    age:        i32,
    height:     f64,
    sex:        String,
    email:      String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::from_db(
            UserId::new(row.id),
            row.name,
            row.age,
            row.height,
            row.sex,
            row.email,
            row.created_at,
        )
    }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, new_user: &NewUser) -> Result<User, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, age, height, sex, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, age, height, sex, email, created_at
            "#,
        )
        .bind(&new_user.name)
        .bind(new_user.age)
        .bind(new_user.height)
        .bind(&new_user.sex)
        .bind(&new_user.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, age, height, sex, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_name_or_email(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, age, height, sex, email, created_at
            FROM users
            WHERE name = $1 OR email = $2
            LIMIT 1
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                age = COALESCE($3, age),
                height = COALESCE($4, height),
                sex = COALESCE($5, sex),
                email = COALESCE($6, email)
            WHERE id = $1
            RETURNING id, name, age, height, sex, email, created_at
            "#,
        )
        .bind(id.as_i64())
        .bind(patch.name.as_deref())
        .bind(patch.age)
        .bind(patch.height)
        .bind(patch.sex.as_deref())
        .bind(patch.email.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: UserId) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, name, age, height, sex, email, created_at
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを満たす() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn UserRepository>>();
    }
}
