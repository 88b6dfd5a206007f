//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラは薄く保ち、エラー分類はユースケースに委譲する

pub mod entry;
pub mod health;
pub mod user;

pub use entry::{
    EntryRequest,
    EntryState,
    delete_entry,
    get_entry,
    list_recent_entries,
    record_entry,
    update_entry,
};
pub use health::{ReadinessState, health_check, readiness_check};
pub use user::{UserState, create_user, delete_user, get_user, update_user};
