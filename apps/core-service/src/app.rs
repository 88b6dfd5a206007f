//! # ルーター構築
//!
//! リポジトリを受け取ってユースケースとハンドラの状態を組み立て、
//! axum の [`Router`] を返す。
//!
//! - [`api_router`] はリポジトリだけに依存する（テストではモックを注入する）
//! - [`readiness_router`] は DB プールに直接依存する

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use healthtrack_domain::entry::{CalorieEntry, ExerciseEntry, MetricEntry, WaterEntry};
use healthtrack_infra::repository::{
    EntryRepository,
    PostgresCalorieRepository,
    PostgresExerciseRepository,
    PostgresUserRepository,
    PostgresWaterRepository,
    UserRepository,
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handler::{
        EntryState,
        ReadinessState,
        UserState,
        create_user,
        delete_entry,
        delete_user,
        get_entry,
        get_user,
        health_check,
        list_recent_entries,
        readiness_check,
        record_entry,
        update_entry,
        update_user,
    },
    usecase::{EntryUseCaseImpl, UserUseCaseImpl},
};

/// アプリケーションが使うリポジトリ一式
pub struct Repositories {
    pub users:    Arc<dyn UserRepository>,
    pub water:    Arc<dyn EntryRepository<WaterEntry>>,
    pub calorie:  Arc<dyn EntryRepository<CalorieEntry>>,
    pub exercise: Arc<dyn EntryRepository<ExerciseEntry>>,
}

impl Repositories {
    /// PostgreSQL 実装で組み立てる
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users:    Arc::new(PostgresUserRepository::new(pool.clone())),
            water:    Arc::new(PostgresWaterRepository::new(pool.clone())),
            calorie:  Arc::new(PostgresCalorieRepository::new(pool.clone())),
            exercise: Arc::new(PostgresExerciseRepository::new(pool.clone())),
        }
    }
}

/// ユーザー・メトリクス・Liveness のルートを持つルーター
pub fn api_router(repos: Repositories) -> Router {
    let user_state = Arc::new(UserState {
        usecase: UserUseCaseImpl::new(repos.users),
    });

    Router::new()
        .route("/health", get(health_check))
        .route("/users", post(create_user))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(user_state)
        .merge(entry_routes(repos.water))
        .merge(entry_routes(repos.calorie))
        .merge(entry_routes(repos.exercise))
}

/// 1 種類のメトリクスのルート（`/{resource}/...`）
fn entry_routes<E: MetricEntry>(repository: Arc<dyn EntryRepository<E>>) -> Router {
    let resource = E::KIND.resource_name();
    let state = Arc::new(EntryState {
        usecase: EntryUseCaseImpl::new(repository),
    });

    Router::new()
        .route(
            &format!("/{resource}/{{user_id}}"),
            get(list_recent_entries::<E>).post(record_entry::<E>),
        )
        .route(
            &format!("/{resource}/{{user_id}}/{{entry_date}}"),
            get(get_entry::<E>)
                .put(update_entry::<E>)
                .delete(delete_entry::<E>),
        )
        .with_state(state)
}

/// Readiness Check のルーター
pub fn readiness_router(pool: PgPool) -> Router {
    Router::new()
        .route("/health/ready", get(readiness_check))
        .with_state(Arc::new(ReadinessState { pool }))
}

/// 本番用のルーター（API + Readiness + 横断レイヤー）
pub fn build_app(repos: Repositories, pool: PgPool) -> Router {
    api_router(repos)
        .merge(readiness_router(pool))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
