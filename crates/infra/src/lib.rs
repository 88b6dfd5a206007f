//! # HealthTrack インフラ層
//!
//! PostgreSQL との接続とリポジトリ実装を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: 接続プールの作成、マイグレーション、疎通確認
//! - **リポジトリ実装**: テーブルごとに 1 リポジトリ。各メソッドは 1 SQL 文を発行する
//! - **エラー分類**: 制約違反の種別をユースケース層が判定できる形で公開する
//!
//! ## 依存関係
//!
//! ```text
//! core-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プールとマイグレーション
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//! - `mock` - インメモリモック（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use healthtrack_infra::{db, repository::PostgresUserRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/healthtrack", 10).await?;
//!     db::run_migrations(&pool).await?;
//!     let users = PostgresUserRepository::new(pool.clone());
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{ConstraintViolation, InfraError, InfraErrorKind};
