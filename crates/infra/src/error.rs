//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! ## 制約違反の分類
//!
//! リポジトリは制約違反をそのまま返す。HTTP ステータスへの対応付けは
//! ユースケース層が [`InfraError::constraint_violation`] と
//! [`InfraError::is_invalid_data`] を使って行う。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// `From<sqlx::Error>` で生成すると、その時点のスパン情報が自動的にキャプチャされる。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー
    ///
    /// SQL の実行失敗、接続エラー、制約違反など。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// マイグレーションエラー
    #[error("マイグレーションエラー: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

/// 違反した制約の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// UNIQUE 制約（SQLSTATE 23505）
    Unique,
    /// 外部キー制約（SQLSTATE 23503）
    ForeignKey,
    /// CHECK 制約（SQLSTATE 23514）
    Check,
    /// NOT NULL 制約（SQLSTATE 23502）
    NotNull,
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 違反した制約の種別を返す
    ///
    /// DB が返したエラーでない場合、または制約違反でない場合は `None`。
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        let db_err = self.database_error()?;
        match db_err.kind() {
            sqlx::error::ErrorKind::UniqueViolation => Some(ConstraintViolation::Unique),
            sqlx::error::ErrorKind::ForeignKeyViolation => Some(ConstraintViolation::ForeignKey),
            sqlx::error::ErrorKind::CheckViolation => Some(ConstraintViolation::Check),
            sqlx::error::ErrorKind::NotNullViolation => Some(ConstraintViolation::NotNull),
            _ => None,
        }
    }

    /// 違反した制約名（例: `users_email_key`）
    pub fn constraint_name(&self) -> Option<&str> {
        self.database_error()?.constraint()
    }

    /// 値そのものが不正なエラーか（SQLSTATE クラス 22: 数値範囲外など）
    pub fn is_invalid_data(&self) -> bool {
        self.database_error()
            .and_then(|db_err| db_err.code())
            .is_some_and(|code| code.starts_with("22"))
    }

    fn database_error(&self) -> Option<&dyn sqlx::error::DatabaseError> {
        match &self.kind {
            InfraErrorKind::Database(sqlx::Error::Database(db_err)) => Some(db_err.as_ref()),
            _ => None,
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Database(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for InfraError {
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        Self {
            kind:       InfraErrorKind::Migration(source),
            span_trace: SpanTrace::capture(),
        }
    }
}
