//! # カロリー記録リポジトリ
//!
//! `calorie_data` テーブルに対する [`EntryRepository`] 実装。
//! `calorie_difference` は生成列なので書き込まず、RETURNING で DB の値を読む。

use async_trait::async_trait;
use chrono::NaiveDate;
use healthtrack_domain::{
    entry::{CalorieEntry, RECENT_ENTRY_LIMIT},
    user::UserId,
};
use sqlx::PgPool;

use super::EntryRepository;
use crate::error::InfraError;

#[derive(Debug, sqlx::FromRow)]
struct CalorieRow {
    user_id:            i64,
    entry_date:         NaiveDate,
    intake_cal:         i32,
    burned_cal:         i32,
    calorie_difference: i32,
}

impl From<CalorieRow> for CalorieEntry {
    fn from(row: CalorieRow) -> Self {
        Self {
            user_id:            UserId::new(row.user_id),
            entry_date:         row.entry_date,
            intake_cal:         row.intake_cal,
            burned_cal:         row.burned_cal,
            calorie_difference: row.calorie_difference,
        }
    }
}

/// PostgreSQL 実装のカロリー記録リポジトリ
#[derive(Debug, Clone)]
pub struct PostgresCalorieRepository {
    pool: PgPool,
}

impl PostgresCalorieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryRepository<CalorieEntry> for PostgresCalorieRepository {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(user_id = %entry.user_id, entry_date = %entry.entry_date)
    )]
    async fn upsert(&self, entry: &CalorieEntry) -> Result<CalorieEntry, InfraError> {
        let row = sqlx::query_as::<_, CalorieRow>(
            r#"
            INSERT INTO calorie_data (user_id, entry_date, intake_cal, burned_cal)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, entry_date)
            DO UPDATE SET
                intake_cal = EXCLUDED.intake_cal,
                burned_cal = EXCLUDED.burned_cal
            RETURNING user_id, entry_date, intake_cal, burned_cal, calorie_difference
            "#,
        )
        .bind(entry.user_id.as_i64())
        .bind(entry.entry_date)
        .bind(entry.intake_cal)
        .bind(entry.burned_cal)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id))]
    async fn find_recent(&self, user_id: UserId) -> Result<Vec<CalorieEntry>, InfraError> {
        let rows = sqlx::query_as::<_, CalorieRow>(
            r#"
            SELECT user_id, entry_date, intake_cal, burned_cal, calorie_difference
            FROM calorie_data
            WHERE user_id = $1
            ORDER BY entry_date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_i64())
        .bind(RECENT_ENTRY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CalorieEntry::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id, %entry_date))]
    async fn find_one(
        &self,
        user_id: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<CalorieEntry>, InfraError> {
        let row = sqlx::query_as::<_, CalorieRow>(
            r#"
            SELECT user_id, entry_date, intake_cal, burned_cal, calorie_difference
            FROM calorie_data
            WHERE user_id = $1 AND entry_date = $2
            "#,
        )
        .bind(user_id.as_i64())
        .bind(entry_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CalorieEntry::from))
    }

    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(user_id = %entry.user_id, entry_date = %entry.entry_date)
    )]
    async fn update(&self, entry: &CalorieEntry) -> Result<Option<CalorieEntry>, InfraError> {
        let row = sqlx::query_as::<_, CalorieRow>(
            r#"
            UPDATE calorie_data
            SET intake_cal = $3, burned_cal = $4
            WHERE user_id = $1 AND entry_date = $2
            RETURNING user_id, entry_date, intake_cal, burned_cal, calorie_difference
            "#,
        )
        .bind(entry.user_id.as_i64())
        .bind(entry.entry_date)
        .bind(entry.intake_cal)
        .bind(entry.burned_cal)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CalorieEntry::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id, %entry_date))]
    async fn delete(
        &self,
        user_id: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<CalorieEntry>, InfraError> {
        let row = sqlx::query_as::<_, CalorieRow>(
            r#"
            DELETE FROM calorie_data
            WHERE user_id = $1 AND entry_date = $2
            RETURNING user_id, entry_date, intake_cal, burned_cal, calorie_difference
            "#,
        )
        .bind(user_id.as_i64())
        .bind(entry_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CalorieEntry::from))
    }
}
