//! # Core Service エラー定義
//!
//! Core Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | バリアント | HTTP |
//! |-----------|------|
//! | `NotFound` | 404 |
//! | `Conflict` | 400（既存クライアント互換） |
//! | `BadRequest` | 400 |
//! | `Database` | 500（詳細はログのみ） |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use healthtrack_infra::InfraError;
use healthtrack_shared::ErrorResponse;
use thiserror::Error;

/// Core Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト（DB の制約・型に合わない値）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 一意制約の重複
    #[error("重複しています: {0}")]
    Conflict(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let body = match self {
            CoreError::NotFound(msg) => ErrorResponse::not_found(msg),
            CoreError::BadRequest(msg) => ErrorResponse::bad_request(msg),
            CoreError::Conflict(msg) => ErrorResponse::conflict(msg),
            CoreError::Database(e) => {
                tracing::error!(
                    error.kind = "database",
                    span_trace = %e.span_trace(),
                    "データベースエラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
        };

        let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(CoreError::NotFound("User not found".into()), StatusCode::NOT_FOUND, "not-found")]
    #[case(CoreError::BadRequest("bad".into()), StatusCode::BAD_REQUEST, "bad-request")]
    #[case(CoreError::Conflict("Username already exists".into()), StatusCode::BAD_REQUEST, "conflict")]
    #[case(
        CoreError::Database(sqlx::Error::PoolTimedOut.into()),
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal-error"
    )]
    #[tokio::test]
    async fn test_into_responseでステータスとproblem_detailsを返す(
        #[case] error: CoreError,
        #[case] expected_status: StatusCode,
        #[case] expected_suffix: &str,
    ) {
        let response = error.into_response();

        assert_eq!(response.status(), expected_status);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, expected_status.as_u16());
        assert!(body.error_type.ends_with(expected_suffix));
    }

    #[tokio::test]
    async fn test_databaseエラーの詳細はレスポンスに含めない() {
        let error = CoreError::Database(sqlx::Error::PoolTimedOut.into());

        let response = error.into_response();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.detail, "Internal server error");
    }
}
