//! # リポジトリ実装
//!
//! テーブルごとのリポジトリトレイトと PostgreSQL 実装を提供する。
//!
//! - すべてのパラメータは `$n` でバインドし、SQL 文字列に値を埋め込まない
//! - 0〜1 件は `Option<T>`、0〜n 件は `Vec<T>` で返す
//! - リトライはしない。DB エラーは [`InfraError`](crate::InfraError) としてそのまま返す

pub mod calorie_repository;
pub mod entry_repository;
pub mod exercise_repository;
pub mod user_repository;
pub mod water_repository;

pub use calorie_repository::PostgresCalorieRepository;
pub use entry_repository::EntryRepository;
pub use exercise_repository::PostgresExerciseRepository;
pub use user_repository::{PostgresUserRepository, UserRepository};
pub use water_repository::PostgresWaterRepository;
