//! # 日次メトリクスエントリー
//!
//! ユーザー 1 人・1 日につき 1 行を持つメトリクス記録を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 値 |
//! |---|------------|----|
//! | [`WaterEntry`] | 飲水記録 | 1 日の総飲水量（リットル） |
//! | [`CalorieEntry`] | カロリー記録 | 摂取・消費カロリーとその差分 |
//! | [`ExerciseEntry`] | 運動記録 | 1 日の運動時間（時間） |
//!
//! ## 不変条件
//!
//! - (user_id, entry_date) の組につきエントリーは最大 1 件
//! - 同じ日付への再登録は値を置き換える（加算しない）
//! - 直近一覧は最大 [`RECENT_ENTRY_LIMIT`] 件、日付の降順

mod calorie;
mod exercise;
mod water;

use chrono::NaiveDate;
pub use calorie::{CalorieEntry, CalorieValues};
pub use exercise::{ExerciseEntry, ExerciseValues};
use serde::{Serialize, de::DeserializeOwned};
pub use water::{WaterEntry, WaterValues};

use crate::user::UserId;

/// 直近一覧で返すエントリーの最大件数
pub const RECENT_ENTRY_LIMIT: i64 = 7;

/// メトリクスの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MetricKind {
    Water,
    Calorie,
    Exercise,
}

impl MetricKind {
    /// 人間可読なエントリー名（エラーメッセージ用）
    pub fn entry_label(&self) -> &'static str {
        match self {
            Self::Water => "Water entry",
            Self::Calorie => "Calorie entry",
            Self::Exercise => "Exercise entry",
        }
    }

    /// HTTP パスのリソース名（`water_data` など）
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::Water => "water_data",
            Self::Calorie => "calorie_data",
            Self::Exercise => "exercise_data",
        }
    }
}

/// 日次メトリクスエントリーの共通インターフェース
///
/// ハンドラ・ユースケース・リポジトリはこのトレイトでジェネリックに書かれ、
/// メトリクスごとの差分は [`Values`](MetricEntry::Values) と SQL だけに閉じる。
pub trait MetricEntry: Clone + std::fmt::Debug + Serialize + Send + Sync + 'static {
    /// クライアントが登録・更新するメトリクス値
    type Values: Clone + std::fmt::Debug + DeserializeOwned + Send + Sync + 'static;

    /// メトリクス種別
    const KIND: MetricKind;

    /// 入力値からエントリーを組み立てる
    ///
    /// 派生値（カロリー差分など）もここで計算する。DB の生成列と同じ規則に従うこと。
    fn from_values(user_id: UserId, entry_date: NaiveDate, values: Self::Values) -> Self;

    fn user_id(&self) -> UserId;

    fn entry_date(&self) -> NaiveDate;
}
