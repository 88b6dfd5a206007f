//! # 飲水記録リポジトリ
//!
//! `water_data` テーブルに対する [`EntryRepository`] 実装。

use async_trait::async_trait;
use chrono::NaiveDate;
use healthtrack_domain::{
    entry::{RECENT_ENTRY_LIMIT, WaterEntry},
    user::UserId,
};
use sqlx::PgPool;

use super::EntryRepository;
use crate::error::InfraError;

#[derive(Debug, sqlx::FromRow)]
struct WaterRow {
    user_id:     i64,
    entry_date:  NaiveDate,
    total_water: f64,
}

impl From<WaterRow> for WaterEntry {
    fn from(row: WaterRow) -> Self {
        Self {
            user_id:     UserId::new(row.user_id),
            entry_date:  row.entry_date,
            total_water: row.total_water,
        }
    }
}

/// PostgreSQL 実装の飲水記録リポジトリ
#[derive(Debug, Clone)]
pub struct PostgresWaterRepository {
    pool: PgPool,
}

impl PostgresWaterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryRepository<WaterEntry> for PostgresWaterRepository {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(user_id = %entry.user_id, entry_date = %entry.entry_date)
    )]
    async fn upsert(&self, entry: &WaterEntry) -> Result<WaterEntry, InfraError> {
        let row = sqlx::query_as::<_, WaterRow>(
            r#"
            INSERT INTO water_data (user_id, entry_date, total_water)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, entry_date)
            DO UPDATE SET total_water = EXCLUDED.total_water
            RETURNING user_id, entry_date, total_water
            "#,
        )
        .bind(entry.user_id.as_i64())
        .bind(entry.entry_date)
        .bind(entry.total_water)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id))]
    async fn find_recent(&self, user_id: UserId) -> Result<Vec<WaterEntry>, InfraError> {
        let rows = sqlx::query_as::<_, WaterRow>(
            r#"
            SELECT user_id, entry_date, total_water
            FROM water_data
            WHERE user_id = $1
            ORDER BY entry_date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_i64())
        .bind(RECENT_ENTRY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WaterEntry::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id, %entry_date))]
    async fn find_one(
        &self,
        user_id: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<WaterEntry>, InfraError> {
        let row = sqlx::query_as::<_, WaterRow>(
            r#"
            SELECT user_id, entry_date, total_water
            FROM water_data
            WHERE user_id = $1 AND entry_date = $2
            "#,
        )
        .bind(user_id.as_i64())
        .bind(entry_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WaterEntry::from))
    }

    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(user_id = %entry.user_id, entry_date = %entry.entry_date)
    )]
    async fn update(&self, entry: &WaterEntry) -> Result<Option<WaterEntry>, InfraError> {
        let row = sqlx::query_as::<_, WaterRow>(
            r#"
            UPDATE water_data
            SET total_water = $3
            WHERE user_id = $1 AND entry_date = $2
            RETURNING user_id, entry_date, total_water
            "#,
        )
        .bind(entry.user_id.as_i64())
        .bind(entry.entry_date)
        .bind(entry.total_water)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WaterEntry::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id, %entry_date))]
    async fn delete(
        &self,
        user_id: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<WaterEntry>, InfraError> {
        let row = sqlx::query_as::<_, WaterRow>(
            r#"
            DELETE FROM water_data
            WHERE user_id = $1 AND entry_date = $2
            RETURNING user_id, entry_date, total_water
            "#,
        )
        .bind(user_id.as_i64())
        .bind(entry_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WaterEntry::from))
    }
}
