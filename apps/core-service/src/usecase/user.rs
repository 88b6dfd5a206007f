//! ユーザー管理ユースケース

use std::sync::Arc;

use healthtrack_domain::user::{NewUser, User, UserId, UserPatch};
use healthtrack_infra::{ConstraintViolation, InfraError, repository::UserRepository};

use super::helpers::{FindResultExt, is_rejected_value};
use crate::error::CoreError;

const USER_NOT_FOUND: &str = "User not found";

/// ユーザー管理ユースケース
pub struct UserUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
}

impl UserUseCaseImpl {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// ユーザーを作成する
    ///
    /// 1. 名前・メールアドレスの重複を事前チェック（重複なら Conflict、挿入しない）
    /// 2. 挿入。事前チェック後に競合した場合も UNIQUE 制約違反を Conflict にする
    pub async fn create_user(&self, input: NewUser) -> Result<User, CoreError> {
        if let Some(existing) = self
            .user_repository
            .find_by_name_or_email(&input.name, &input.email)
            .await?
        {
            let message = if existing.name() == input.name {
                "Username already exists"
            } else {
                "Email already exists"
            };
            return Err(CoreError::Conflict(message.to_string()));
        }

        let user = self
            .user_repository
            .insert(&input)
            .await
            .map_err(|e| classify_user_write_error(e, "Error creating user"))?;

        tracing::info!(user_id = %user.id(), "ユーザーを作成しました");
        Ok(user)
    }

    /// ユーザーを取得する
    pub async fn get_user(&self, id: UserId) -> Result<User, CoreError> {
        self.user_repository
            .find_by_id(id)
            .await
            .or_not_found(USER_NOT_FOUND)
    }

    /// ユーザーを部分更新する
    ///
    /// 未指定のフィールドは現在の値を維持する。
    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, CoreError> {
        self.user_repository
            .update(id, &patch)
            .await
            .map_err(|e| classify_user_write_error(e, "Error updating user"))?
            .ok_or_else(|| CoreError::NotFound(USER_NOT_FOUND.to_string()))
    }

    /// ユーザーを削除する（エントリーも連鎖して削除される）
    pub async fn delete_user(&self, id: UserId) -> Result<(), CoreError> {
        self.user_repository
            .delete(id)
            .await
            .or_not_found(USER_NOT_FOUND)?;

        tracing::info!(user_id = %id, "ユーザーを削除しました");
        Ok(())
    }
}

/// ユーザー書き込み時の DB エラーを分類する
fn classify_user_write_error(error: InfraError, rejected_message: &str) -> CoreError {
    if error.constraint_violation() == Some(ConstraintViolation::Unique) {
        let message = match error.constraint_name() {
            Some("users_name_key") => "Username already exists",
            Some("users_email_key") => "Email already exists",
            _ => "User already exists",
        };
        return CoreError::Conflict(message.to_string());
    }
    if is_rejected_value(&error) {
        return CoreError::BadRequest(rejected_message.to_string());
    }
    CoreError::Database(error)
}
