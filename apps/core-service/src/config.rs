//! # Core Service 設定
//!
//! 環境変数から Core Service サーバーの設定を読み込む。
//!
//! `DATABASE_URL` が未設定の場合は `POSTGRES_*` から接続 URL を組み立てる。

use std::{env, str::FromStr};

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("環境変数 {0} が設定されていません")]
    Missing(&'static str),

    /// 値をパースできない
    #[error("環境変数 {name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Core Service サーバーの設定
#[derive(Clone)]
#[cfg_attr(test, derive(Debug))]
pub struct CoreConfig {
    /// バインドアドレス
    pub host:            String,
    /// ポート番号
    pub port:            u16,
    /// データベース接続 URL（パスワードを含むためログに出さない）
    pub database_url:    String,
    /// 接続プールの最大接続数
    pub max_connections: u32,
}

impl CoreConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意のキー検索関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => assemble_database_url(&lookup)?,
        };

        Ok(Self {
            host: lookup("CORE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "CORE_PORT", 8000)?,
            database_url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
        })
    }

    /// `host:port` 形式のバインドアドレス
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn assemble_database_url(lookup: &impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    let password = lookup("POSTGRES_PASSWORD").ok_or(ConfigError::Missing("POSTGRES_PASSWORD"))?;
    let host = lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());
    let port: u16 = parse_or(lookup, "POSTGRES_PORT", 5432)?;
    let user = lookup("POSTGRES_USER").unwrap_or_else(|| "postgres".to_string());
    let database = lookup("POSTGRES_DB").unwrap_or_else(|| "postgres".to_string());

    Ok(format!(
        "postgres://{user}:{password}@{host}:{port}/{database}"
    ))
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
