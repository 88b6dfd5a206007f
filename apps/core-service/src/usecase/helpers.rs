//! ユースケース層の共通ヘルパー
//!
//! リポジトリ呼び出し結果の変換など、ユーザー・エントリー両方のユースケースで
//! 繰り返されるパターンを共通化する。

use healthtrack_infra::{ConstraintViolation, InfraError};

use crate::error::CoreError;

/// リポジトリの `Result<Option<T>, InfraError>` を `Result<T, CoreError>` に変換する
///
/// ```ignore
/// let user = self.user_repository.find_by_id(id).await.or_not_found("User not found")?;
/// ```
pub(crate) trait FindResultExt<T> {
    /// `None` の場合は `CoreError::NotFound`、`InfraError` の場合は `CoreError::Database` を返す
    fn or_not_found(self, message: &str) -> Result<T, CoreError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, InfraError> {
    fn or_not_found(self, message: &str) -> Result<T, CoreError> {
        self?.ok_or_else(|| CoreError::NotFound(message.to_string()))
    }
}

/// 値が DB の制約・型に合わなかったエラーか
///
/// CHECK / NOT NULL 違反と SQLSTATE クラス 22（数値範囲外など）が該当する。
pub(crate) fn is_rejected_value(error: &InfraError) -> bool {
    matches!(
        error.constraint_violation(),
        Some(ConstraintViolation::Check | ConstraintViolation::NotNull)
    ) || error.is_invalid_data()
}
