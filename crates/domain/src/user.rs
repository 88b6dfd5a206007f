//! # ユーザー
//!
//! ユーザーエンティティとその作成・更新入力を定義する。
//!
//! ## 設計方針
//!
//! - **サーバー採番**: `id` と `created_at` は DB が割り当てる。アプリ側で生成しない
//! - **一意性は DB 制約で担保**: `name` と `email` は UNIQUE 制約を持つ。
//!   事前チェックはあくまで早期検出であり、最終的な判定は制約違反で行う
//! - **不変性**: エンティティはゲッター経由でのみ参照する
//!
//! ## 使用例
//!
//! ```rust
//! use healthtrack_domain::user::{User, UserId};
//!
//! let user = User::from_db(
//!     UserId::new(1),
//!     "Ann".to_string(),
//!     30,
//!     1.7,
//!     "F".to_string(),
//!     "ann@x.com".to_string(),
//!     chrono::Utc::now(),
//! );
//! assert_eq!(user.name(), "Ann");
//! ```

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// ユーザー ID（一意識別子）
///
/// DB の IDENTITY 列が採番する連番。Newtype パターンで
/// エントリーの数量などとの取り違えを防ぐ。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct UserId(i64);

impl UserId {
    /// 既存の値からユーザー ID を作成する
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// 内部の値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// ユーザーエンティティ
///
/// # 不変条件
///
/// - `name` はシステム内で一意
/// - `email` はシステム内で一意
/// - `created_at` は作成リクエストの受付時刻以降（DB の `now()`）
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id:         UserId,
    name:       String,
    age:        i32,
    height:     f64,
    sex:        String,
    email:      String,
    created_at: DateTime<Utc>,
}

impl User {
    /// 永続化された行からユーザーを復元する
    pub fn from_db(
        id: UserId,
        name: String,
        age: i32,
        height: f64,
        sex: String,
        email: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            age,
            height,
            sex,
            email,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn sex(&self) -> &str {
        &self.sex
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// ユーザー作成の入力
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name:   String,
    pub age:    i32,
    pub height: f64,
    pub sex:    String,
    pub email:  String,
}

/// ユーザー部分更新の入力
///
/// 指定されたフィールドのみ更新する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name:   Option<String>,
    pub age:    Option<i32>,
    pub height: Option<f64>,
    pub sex:    Option<String>,
    pub email:  Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ann() -> User {
        User::from_db(
            UserId::new(1),
            "Ann".to_string(),
            30,
            1.7,
            "F".to_string(),
            "ann@x.com".to_string(),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
    }

    #[test]
    fn test_user_idはjsonで数値としてシリアライズされる() {
        let json = serde_json::to_value(UserId::new(42)).unwrap();
        assert_eq!(json, serde_json::json!(42));
    }

    #[test]
    fn test_from_dbの値がゲッターから読める() {
        let user = ann();

        assert_eq!(user.id(), UserId::new(1));
        assert_eq!(user.name(), "Ann");
        assert_eq!(user.age(), 30);
        assert_eq!(user.sex(), "F");
        assert_eq!(user.email(), "ann@x.com");
    }
}
