//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::NaiveDate;
use healthtrack_domain::user::{NewUser, User};
use healthtrack_infra::repository::{PostgresUserRepository, UserRepository};
use sqlx::PgPool;

/// テスト用の日付（2024-01-`day`）
pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

/// デフォルト値で NewUser を作成
pub fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name:   name.to_string(),
        age:    30,
        height: 1.7,
        sex:    "F".to_string(),
        email:  email.to_string(),
    }
}

/// ユーザーを 1 件登録して返す
pub async fn insert_user(pool: &PgPool, name: &str, email: &str) -> User {
    PostgresUserRepository::new(pool.clone())
        .insert(&new_user(name, email))
        .await
        .expect("ユーザー作成に失敗")
}
