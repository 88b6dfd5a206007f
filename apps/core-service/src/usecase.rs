//! # ユースケース層
//!
//! Core Service のアプリケーションロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **エラー分類**: DB の制約違反を NotFound / Conflict / BadRequest に振り分ける
//!
//! ## モジュール構成
//!
//! - `user`: ユーザー CRUD
//! - `entry`: 日次メトリクス（飲水・カロリー・運動）

pub(crate) mod helpers;

pub mod entry;
pub mod user;

pub use entry::EntryUseCaseImpl;
pub use user::UserUseCaseImpl;
