//! # EntryRepository
//!
//! 日次メトリクス（飲水・カロリー・運動）の永続化インターフェース。
//!
//! メトリクスごとにテーブルと SQL が異なるため、実装は
//! [`PostgresWaterRepository`](super::PostgresWaterRepository) などに分かれる。
//! ユースケース層はこのトレイトだけに依存する。

use async_trait::async_trait;
use chrono::NaiveDate;
use healthtrack_domain::{entry::MetricEntry, user::UserId};

use crate::error::InfraError;

/// メトリクスエントリーのリポジトリトレイト
///
/// 主キーは `(user_id, entry_date)`。
#[async_trait]
pub trait EntryRepository<E: MetricEntry>: Send + Sync {
    /// エントリーを登録する。同じ日付の行が既にあれば値を置き換える
    ///
    /// ユーザーが存在しない場合は外部キー制約違反のエラーになる。
    async fn upsert(&self, entry: &E) -> Result<E, InfraError>;

    /// 直近のエントリーを日付の降順で最大
    /// [`RECENT_ENTRY_LIMIT`](healthtrack_domain::entry::RECENT_ENTRY_LIMIT) 件返す
    async fn find_recent(&self, user_id: UserId) -> Result<Vec<E>, InfraError>;

    /// 指定日のエントリーを取得する
    async fn find_one(
        &self,
        user_id: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<E>, InfraError>;

    /// 既存エントリーの値を置き換える
    ///
    /// 該当行が存在しない場合は `None`（新規作成はしない）。
    async fn update(&self, entry: &E) -> Result<Option<E>, InfraError>;

    /// エントリーを削除し、削除した行を返す
    async fn delete(
        &self,
        user_id: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<E>, InfraError>;
}
