//! 日次メトリクスエントリーのユースケース
//!
//! 飲水・カロリー・運動の 3 種類で共通。差分は [`MetricEntry`] 実装とリポジトリに閉じる。

use std::sync::Arc;

use chrono::NaiveDate;
use healthtrack_domain::{entry::MetricEntry, user::UserId};
use healthtrack_infra::{ConstraintViolation, InfraError, repository::EntryRepository};

use super::helpers::{FindResultExt, is_rejected_value};
use crate::error::CoreError;

/// メトリクスエントリーのユースケース
pub struct EntryUseCaseImpl<E: MetricEntry> {
    repository: Arc<dyn EntryRepository<E>>,
}

impl<E: MetricEntry> EntryUseCaseImpl<E> {
    pub fn new(repository: Arc<dyn EntryRepository<E>>) -> Self {
        Self { repository }
    }

    /// エントリーを登録する（同じ日付は値を置き換える）
    pub async fn record(
        &self,
        user_id: UserId,
        entry_date: NaiveDate,
        values: E::Values,
    ) -> Result<E, CoreError> {
        let entry = E::from_values(user_id, entry_date, values);
        let stored = self
            .repository
            .upsert(&entry)
            .await
            .map_err(classify_write_error::<E>)?;

        tracing::debug!(
            metric = %E::KIND,
            %user_id,
            %entry_date,
            "エントリーを登録しました"
        );
        Ok(stored)
    }

    /// 直近のエントリーを日付の降順で返す
    ///
    /// 1 件もなければ NotFound。
    pub async fn list_recent(&self, user_id: UserId) -> Result<Vec<E>, CoreError> {
        let entries = self.repository.find_recent(user_id).await?;
        if entries.is_empty() {
            return Err(CoreError::NotFound(format!("No {} entries found", E::KIND)));
        }
        Ok(entries)
    }

    /// 指定日のエントリーを取得する
    pub async fn get(&self, user_id: UserId, entry_date: NaiveDate) -> Result<E, CoreError> {
        self.repository
            .find_one(user_id, entry_date)
            .await
            .or_not_found(&not_found_message::<E>())
    }

    /// 既存エントリーの値を置き換える
    pub async fn update(
        &self,
        user_id: UserId,
        entry_date: NaiveDate,
        values: E::Values,
    ) -> Result<E, CoreError> {
        let entry = E::from_values(user_id, entry_date, values);
        self.repository
            .update(&entry)
            .await
            .map_err(classify_write_error::<E>)?
            .ok_or_else(|| CoreError::NotFound(not_found_message::<E>()))
    }

    /// エントリーを削除する
    pub async fn delete(&self, user_id: UserId, entry_date: NaiveDate) -> Result<(), CoreError> {
        self.repository
            .delete(user_id, entry_date)
            .await
            .or_not_found(&not_found_message::<E>())?;
        Ok(())
    }
}

fn not_found_message<E: MetricEntry>() -> String {
    format!("{} not found", E::KIND.entry_label())
}

/// エントリー書き込み時の DB エラーを分類する
///
/// 外部キー違反はユーザー不在を意味する。
fn classify_write_error<E: MetricEntry>(error: InfraError) -> CoreError {
    if error.constraint_violation() == Some(ConstraintViolation::ForeignKey) {
        return CoreError::NotFound("User not found".to_string());
    }
    if is_rejected_value(&error) {
        return CoreError::BadRequest(format!("Invalid {} values", E::KIND));
    }
    CoreError::Database(error)
}

#[cfg(test)]
mod tests {
    use healthtrack_domain::entry::{CalorieEntry, CalorieValues, WaterEntry, WaterValues};
    use healthtrack_infra::mock::{MockEntryRepository, MockUserRepository, SimulatedDbError};
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn water_usecase() -> (EntryUseCaseImpl<WaterEntry>, MockEntryRepository<WaterEntry>) {
        let repo = MockEntryRepository::<WaterEntry>::new();
        (EntryUseCaseImpl::new(Arc::new(repo.clone())), repo)
    }

    #[tokio::test]
    async fn test_recordを2回行うと後の値で置き換わる() {
        let (sut, repo) = water_usecase();
        let user_id = UserId::new(1);

        sut.record(user_id, date(1), WaterValues { water: 1.5 })
            .await
            .unwrap();
        sut.record(user_id, date(1), WaterValues { water: 2.0 })
            .await
            .unwrap();

        assert_eq!(repo.count(), 1);
        let entry = sut.get(user_id, date(1)).await.unwrap();
        assert_eq!(entry.total_water, 2.0);
    }

    #[tokio::test]
    async fn test_recordで存在しないユーザーはuser_not_found() {
        let repo = MockEntryRepository::<WaterEntry>::with_users(MockUserRepository::new());
        let sut = EntryUseCaseImpl::new(Arc::new(repo));

        let err = sut
            .record(UserId::new(9), date(1), WaterValues { water: 1.0 })
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::NotFound(msg) if msg == "User not found"));
    }

    #[tokio::test]
    async fn test_recordでcheck制約違反はbad_request() {
        let repo = MockEntryRepository::<CalorieEntry>::new();
        repo.fail_next_write(SimulatedDbError::new(
            "23514",
            Some("calorie_data_intake_cal_check"),
        ));
        let sut = EntryUseCaseImpl::new(Arc::new(repo));

        let err = sut
            .record(
                UserId::new(1),
                date(1),
                CalorieValues {
                    intake_cal: -1,
                    burned_cal: 0,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::BadRequest(msg) if msg == "Invalid calorie values"));
    }

    #[tokio::test]
    async fn test_list_recentで0件ならnot_found() {
        let (sut, _) = water_usecase();

        let err = sut.list_recent(UserId::new(1)).await.unwrap_err();

        assert!(matches!(err, CoreError::NotFound(msg) if msg == "No water entries found"));
    }

    #[tokio::test]
    async fn test_list_recentは日付降順で最大7件() {
        let (sut, _) = water_usecase();
        let user_id = UserId::new(1);
        for day in [5, 1, 9, 3, 7, 2, 8, 4, 6] {
            sut.record(user_id, date(day), WaterValues { water: 1.0 })
                .await
                .unwrap();
        }

        let entries = sut.list_recent(user_id).await.unwrap();

        let days: Vec<NaiveDate> = entries.iter().map(|e| e.entry_date).collect();
        assert_eq!(days, (3..=9).rev().map(date).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_updateで存在しない日付はnot_foundで作成しない() {
        let (sut, repo) = water_usecase();

        let err = sut
            .update(UserId::new(1), date(1), WaterValues { water: 1.0 })
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::NotFound(msg) if msg == "Water entry not found"));
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn test_deleteで存在しない日付はnot_foundでテーブルは変わらない() {
        let (sut, repo) = water_usecase();
        let user_id = UserId::new(1);
        sut.record(user_id, date(1), WaterValues { water: 1.0 })
            .await
            .unwrap();

        let err = sut.delete(user_id, date(2)).await.unwrap_err();

        assert!(matches!(err, CoreError::NotFound(_)));
        assert_eq!(repo.count(), 1);
    }
}
