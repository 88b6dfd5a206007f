//! # Core Service ライブラリ
//!
//! ルーター・設定・ユースケース・ハンドラを公開する。
//! バイナリ（`main.rs`）と結合テストの両方から使う。

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
