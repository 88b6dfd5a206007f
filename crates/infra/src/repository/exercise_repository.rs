//! # 運動記録リポジトリ
//!
//! `exercise_data` テーブルに対する [`EntryRepository`] 実装。

use async_trait::async_trait;
use chrono::NaiveDate;
use healthtrack_domain::{
    entry::{ExerciseEntry, RECENT_ENTRY_LIMIT},
    user::UserId,
};
use sqlx::PgPool;

use super::EntryRepository;
use crate::error::InfraError;

#[derive(Debug, sqlx::FromRow)]
struct ExerciseRow {
    user_id:        i64,
    entry_date:     NaiveDate,
    total_exercise: f64,
}

impl From<ExerciseRow> for ExerciseEntry {
    fn from(row: ExerciseRow) -> Self {
        Self {
            user_id:        UserId::new(row.user_id),
            entry_date:     row.entry_date,
            total_exercise: row.total_exercise,
        }
    }
}

/// PostgreSQL 実装の運動記録リポジトリ
#[derive(Debug, Clone)]
pub struct PostgresExerciseRepository {
    pool: PgPool,
}

impl PostgresExerciseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryRepository<ExerciseEntry> for PostgresExerciseRepository {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(user_id = %entry.user_id, entry_date = %entry.entry_date)
    )]
    async fn upsert(&self, entry: &ExerciseEntry) -> Result<ExerciseEntry, InfraError> {
        let row = sqlx::query_as::<_, ExerciseRow>(
            r#"
            INSERT INTO exercise_data (user_id, entry_date, total_exercise)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, entry_date)
            DO UPDATE SET total_exercise = EXCLUDED.total_exercise
            RETURNING user_id, entry_date, total_exercise
            "#,
        )
        .bind(entry.user_id.as_i64())
        .bind(entry.entry_date)
        .bind(entry.total_exercise)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id))]
    async fn find_recent(&self, user_id: UserId) -> Result<Vec<ExerciseEntry>, InfraError> {
        let rows = sqlx::query_as::<_, ExerciseRow>(
            r#"
            SELECT user_id, entry_date, total_exercise
            FROM exercise_data
            WHERE user_id = $1
            ORDER BY entry_date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_i64())
        .bind(RECENT_ENTRY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ExerciseEntry::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id, %entry_date))]
    async fn find_one(
        &self,
        user_id: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<ExerciseEntry>, InfraError> {
        let row = sqlx::query_as::<_, ExerciseRow>(
            r#"
            SELECT user_id, entry_date, total_exercise
            FROM exercise_data
            WHERE user_id = $1 AND entry_date = $2
            "#,
        )
        .bind(user_id.as_i64())
        .bind(entry_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ExerciseEntry::from))
    }

    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(user_id = %entry.user_id, entry_date = %entry.entry_date)
    )]
    async fn update(&self, entry: &ExerciseEntry) -> Result<Option<ExerciseEntry>, InfraError> {
        let row = sqlx::query_as::<_, ExerciseRow>(
            r#"
            UPDATE exercise_data
            SET total_exercise = $3
            WHERE user_id = $1 AND entry_date = $2
            RETURNING user_id, entry_date, total_exercise
            "#,
        )
        .bind(entry.user_id.as_i64())
        .bind(entry.entry_date)
        .bind(entry.total_exercise)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ExerciseEntry::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id, %entry_date))]
    async fn delete(
        &self,
        user_id: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<ExerciseEntry>, InfraError> {
        let row = sqlx::query_as::<_, ExerciseRow>(
            r#"
            DELETE FROM exercise_data
            WHERE user_id = $1 AND entry_date = $2
            RETURNING user_id, entry_date, total_exercise
            "#,
        )
        .bind(user_id.as_i64())
        .bind(entry_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ExerciseEntry::from))
    }
}
