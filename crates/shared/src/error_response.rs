//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! API 共通のエラーレスポンス構造体を提供する。
//!
//! - `ErrorResponse` は純粋なデータ構造で、axum の `IntoResponse` 変換はサービス側で行う
//! - 既存クライアントとの互換性のため、重複エラーは 400 で返す

use serde::{Deserialize, Serialize};

/// `type` URI の共通プレフィックス
const ERROR_TYPE_BASE: &str = "https://healthtrack.example.com/errors";

/// 全ハンドラ共通のエラーボディ
///
/// `detail` は人間向けのメッセージで、クライアントはこれをそのまま表示してよい。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

impl ErrorResponse {
    /// `error_type_suffix` を共通プレフィックスに連結して `type` を作る
    pub fn new(
        error_type_suffix: &str,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
            title: title.into(),
            status,
            detail: detail.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new("bad-request", "Bad Request", 400, detail)
    }

    /// 404 Not Found
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new("not-found", "Not Found", 404, detail)
    }

    /// 一意制約の重複（ステータスは 400）
    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new("conflict", "Conflict", 400, detail)
    }

    /// 500 Internal Server Error
    ///
    /// detail は固定値（DB エラーの中身をクライアントに返さない）。
    pub fn internal_error() -> Self {
        Self::new(
            "internal-error",
            "Internal Server Error",
            500,
            "Internal server error",
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::bad_request(ErrorResponse::bad_request("Invalid water values"), "bad-request", "Bad Request", 400)]
    #[case::not_found(ErrorResponse::not_found("User not found"), "not-found", "Not Found", 404)]
    #[case::conflict(ErrorResponse::conflict("Username already exists"), "conflict", "Conflict", 400)]
    fn test_コンストラクタごとのtypeとステータス(
        #[case] error: ErrorResponse,
        #[case] suffix: &str,
        #[case] title: &str,
        #[case] status: u16,
    ) {
        assert_eq!(error.error_type, format!("{ERROR_TYPE_BASE}/{suffix}"));
        assert_eq!(error.title, title);
        assert_eq!(error.status, status);
    }

    #[test]
    fn test_internal_errorはdb由来の詳細を含まない() {
        let error = ErrorResponse::internal_error();

        assert_eq!(error.status, 500);
        assert_eq!(error.detail, "Internal server error");
    }

    #[test]
    fn test_typeキーでシリアライズされる() {
        let value = serde_json::to_value(ErrorResponse::not_found("Water entry not found")).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "type": "https://healthtrack.example.com/errors/not-found",
                "title": "Not Found",
                "status": 404,
                "detail": "Water entry not found"
            })
        );
    }
}
