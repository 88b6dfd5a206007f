//! # ユーザーハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /users` - ユーザー作成
//! - `GET /users/{user_id}` - ユーザー取得
//! - `PUT /users/{user_id}` - ユーザー部分更新
//! - `DELETE /users/{user_id}` - ユーザー削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use healthtrack_domain::user::{NewUser, User, UserId, UserPatch};
use healthtrack_shared::DetailResponse;
use serde::{Deserialize, Serialize};

use crate::{error::CoreError, usecase::UserUseCaseImpl};

/// ユーザー API の共有状態
pub struct UserState {
    pub usecase: UserUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// ユーザー作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name:   String,
    pub age:    i32,
    pub height: f64,
    pub sex:    String,
    pub email:  String,
}

/// ユーザー更新リクエスト（指定したフィールドのみ更新）
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name:   Option<String>,
    pub age:    Option<i32>,
    pub height: Option<f64>,
    pub sex:    Option<String>,
    pub email:  Option<String>,
}

/// ユーザー DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDto {
    pub id:         i64,
    pub name:       String,
    pub age:        i32,
    pub height:     f64,
    pub sex:        String,
    pub email:      String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id:         user.id().as_i64(),
            name:       user.name().to_string(),
            age:        user.age(),
            height:     user.height(),
            sex:        user.sex().to_string(),
            email:      user.email().to_string(),
            created_at: user.created_at(),
        }
    }
}

// --- ハンドラ ---

/// POST /users
///
/// ## レスポンス
///
/// - `201 Created`: 作成されたユーザー
/// - `400 Bad Request`: 名前またはメールアドレスが重複
pub async fn create_user(
    State(state): State<Arc<UserState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let input = NewUser {
        name:   req.name,
        age:    req.age,
        height: req.height,
        sex:    req.sex,
        email:  req.email,
    };

    let user = state.usecase.create_user(input).await?;

    Ok((StatusCode::CREATED, Json(UserDto::from(&user))))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<Arc<UserState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, CoreError> {
    let user = state.usecase.get_user(UserId::new(user_id)).await?;

    Ok((StatusCode::OK, Json(UserDto::from(&user))))
}

/// PUT /users/{user_id}
///
/// ## レスポンス
///
/// - `200 OK`: 更新後のユーザー
/// - `400 Bad Request`: 名前またはメールアドレスが他ユーザーと重複
/// - `404 Not Found`: ユーザーが見つからない
pub async fn update_user(
    State(state): State<Arc<UserState>>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let patch = UserPatch {
        name:   req.name,
        age:    req.age,
        height: req.height,
        sex:    req.sex,
        email:  req.email,
    };

    let user = state
        .usecase
        .update_user(UserId::new(user_id), patch)
        .await?;

    Ok((StatusCode::OK, Json(UserDto::from(&user))))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<Arc<UserState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, CoreError> {
    state.usecase.delete_user(UserId::new(user_id)).await?;

    Ok((StatusCode::OK, Json(DetailResponse::new("User deleted"))))
}
