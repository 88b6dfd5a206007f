//! # ログ出力の初期化
//!
//! サービス起動時に一度だけ呼ぶ `init_tracing` と、その設定型。
//! 環境変数 `LOG_FORMAT` で JSON / Pretty 出力を切り替える。

/// ログ出力形式
///
/// 値が未設定または不正な場合は [`Pretty`](LogFormat::Pretty) にフォールバックする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 イベント 1 行の JSON（ログ収集基盤向け）
    Json,
    /// 色付きの複数行表示（ローカル開発向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// `"json"` / `"pretty"` 以外はフォールバック扱い
    ///
    /// トレーシング初期化前に呼ばれるため、不正値の警告は stderr に直接出す。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|val| Self::parse(&val))
            .unwrap_or_default()
    }
}

/// `init_tracing` に渡す設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// サービス名（呼び出し元の `app` スパンに載せる）
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// ログ形式だけを環境変数から決める
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` でログレベルを制御する。未設定時は `"info,healthtrack=debug"`。
///
/// `ErrorLayer` を登録するので、インフラ層のエラーが生成時点の `SpanTrace` を保持できる。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,healthtrack=debug".into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("pretty", LogFormat::Pretty)]
    #[case("JSON", LogFormat::Pretty)]
    #[case("", LogFormat::Pretty)]
    fn test_parse_既知の値以外はprettyになる(#[case] input: &str, #[case] expected: LogFormat) {
        assert_eq!(LogFormat::parse(input), expected);
    }

    #[test]
    fn test_tracing_configはサービス名と形式を保持する() {
        let config = TracingConfig::new("core-service", LogFormat::Json);

        assert_eq!(config.service_name, "core-service");
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
