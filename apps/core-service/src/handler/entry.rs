//! # メトリクスエントリーハンドラ
//!
//! 飲水・カロリー・運動の 3 種類で共通のハンドラ。`{metric}` は
//! `water` / `calorie` / `exercise`。
//!
//! ## エンドポイント
//!
//! - `GET /{metric}_data/{user_id}` - 直近 7 件（日付降順）
//! - `POST /{metric}_data/{user_id}` - 登録（同じ日付は置き換え）
//! - `GET /{metric}_data/{user_id}/{entry_date}` - 指定日の取得
//! - `PUT /{metric}_data/{user_id}/{entry_date}` - 指定日の値を置き換え
//! - `DELETE /{metric}_data/{user_id}/{entry_date}` - 指定日の削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use healthtrack_domain::{entry::MetricEntry, user::UserId};
use healthtrack_shared::DetailResponse;
use serde::Deserialize;

use crate::{error::CoreError, usecase::EntryUseCaseImpl};

/// エントリー API の共有状態
pub struct EntryState<E: MetricEntry> {
    pub usecase: EntryUseCaseImpl<E>,
}

/// エントリー登録リクエスト
///
/// `entry_date` 以外のフィールドはメトリクスごとの値（`water` など）。
#[derive(Debug, Deserialize)]
pub struct EntryRequest<V> {
    pub entry_date: NaiveDate,
    #[serde(flatten)]
    pub values:     V,
}

/// POST /{metric}_data/{user_id}
///
/// ## レスポンス
///
/// - `200 OK`: 保存されたエントリー
/// - `400 Bad Request`: 値が DB の制約に合わない
/// - `404 Not Found`: ユーザーが存在しない
pub async fn record_entry<E: MetricEntry>(
    State(state): State<Arc<EntryState<E>>>,
    Path(user_id): Path<i64>,
    Json(req): Json<EntryRequest<E::Values>>,
) -> Result<impl IntoResponse, CoreError> {
    let entry = state
        .usecase
        .record(UserId::new(user_id), req.entry_date, req.values)
        .await?;

    Ok((StatusCode::OK, Json(entry)))
}

/// GET /{metric}_data/{user_id}
pub async fn list_recent_entries<E: MetricEntry>(
    State(state): State<Arc<EntryState<E>>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, CoreError> {
    let entries = state.usecase.list_recent(UserId::new(user_id)).await?;

    Ok((StatusCode::OK, Json(entries)))
}

/// GET /{metric}_data/{user_id}/{entry_date}
pub async fn get_entry<E: MetricEntry>(
    State(state): State<Arc<EntryState<E>>>,
    Path((user_id, entry_date)): Path<(i64, NaiveDate)>,
) -> Result<impl IntoResponse, CoreError> {
    let entry = state
        .usecase
        .get(UserId::new(user_id), entry_date)
        .await?;

    Ok((StatusCode::OK, Json(entry)))
}

/// PUT /{metric}_data/{user_id}/{entry_date}
///
/// 既存エントリーの値を置き換える。存在しなければ 404（作成はしない）。
pub async fn update_entry<E: MetricEntry>(
    State(state): State<Arc<EntryState<E>>>,
    Path((user_id, entry_date)): Path<(i64, NaiveDate)>,
    Json(values): Json<E::Values>,
) -> Result<impl IntoResponse, CoreError> {
    let entry = state
        .usecase
        .update(UserId::new(user_id), entry_date, values)
        .await?;

    Ok((StatusCode::OK, Json(entry)))
}

/// DELETE /{metric}_data/{user_id}/{entry_date}
pub async fn delete_entry<E: MetricEntry>(
    State(state): State<Arc<EntryState<E>>>,
    Path((user_id, entry_date)): Path<(i64, NaiveDate)>,
) -> Result<impl IntoResponse, CoreError> {
    state
        .usecase
        .delete(UserId::new(user_id), entry_date)
        .await?;

    let detail = format!("{} deleted", E::KIND.entry_label());
    Ok((StatusCode::OK, Json(DetailResponse::new(detail))))
}
