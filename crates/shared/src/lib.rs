//! # HealthTrack 共有ユーティリティ
//!
//! サービス全体で使用される、ビジネスロジックを含まない共通部品を提供する。
//!
//! ## 設計方針
//!
//! - ドメイン・インフラのどちらにも依存しない
//! - axum に依存しない（`IntoResponse` 変換はサービス側の責務）
//! - 外部クレートへの依存は最小限に抑える

pub mod detail_response;
pub mod error_response;
pub mod health;
pub mod observability;

pub use detail_response::DetailResponse;
pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
