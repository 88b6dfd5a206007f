//! # HealthTrack ドメイン層
//!
//! ユーザーと日次メトリクス（飲水量・カロリー収支・運動時間）のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **永続化非依存**: DB や HTTP には一切依存しない。行の読み書きはインフラ層の責務
//! - **Newtype パターン**: 識別子はプリミティブをラップし、取り違えを型で防ぐ
//! - **メトリクスの共通化**: 3 種類のエントリーは [`entry::MetricEntry`] トレイトで
//!   抽象化し、ハンドラ・ユースケースを 1 つの実装で共有する
//!
//! ## 依存関係の方向
//!
//! ```text
//! core-service → infra → domain
//!       ↘                  ↑
//!         ─────────────────
//! ```
//!
//! ## モジュール構成
//!
//! - [`user`] - ユーザーエンティティ
//! - [`entry`] - 日次メトリクスエントリー（water / calorie / exercise）
//!
//! ## 使用例
//!
//! ```rust
//! use chrono::NaiveDate;
//! use healthtrack_domain::{
//!     entry::{MetricEntry, WaterEntry, WaterValues},
//!     user::UserId,
//! };
//!
//! let entry = WaterEntry::from_values(
//!     UserId::new(1),
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     WaterValues { water: 1.5 },
//! );
//! assert_eq!(entry.total_water, 1.5);
//! ```

pub mod entry;
pub mod user;
