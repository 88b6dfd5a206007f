//! # 詳細メッセージレスポンス
//!
//! 削除 API など、返すべきリソースを持たない成功レスポンス `{ "detail": "..." }`。

use serde::{Deserialize, Serialize};

/// `{ "detail": "..." }` 形式のレスポンス
///
/// ```
/// use healthtrack_shared::DetailResponse;
///
/// let response = DetailResponse::new("User deleted");
/// assert_eq!(response.detail, "User deleted");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
