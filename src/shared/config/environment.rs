use crate::shared::errors::{AppError, AppResult};

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 環境変数取得エラー
#[derive(Debug, Clone)]
pub struct EnvVarError {
    /// 変数名
    pub var_name: String,
    /// エラーメッセージ
    pub message: String,
}

impl std::fmt::Display for EnvVarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "環境変数 {} が見つかりません: {}",
            self.var_name, self.message
        )
    }
}

impl std::error::Error for EnvVarError {}

impl From<EnvVarError> for AppError {
    fn from(error: EnvVarError) -> Self {
        AppError::Configuration(error.to_string())
    }
}

/// 環境変数を取得する（優先順位: 起動時 > コンパイル時 > エラー）
///
/// # 取得順序
/// 1. 起動時の環境変数（`std::env::var`）
/// 2. コンパイル時の環境変数（`option_env!`マクロ）
/// 3. どちらも見つからない場合はエラー
#[macro_export]
macro_rules! get_env_var {
    ($var_name:expr) => {{
        if let Ok(value) = std::env::var($var_name) {
            log::debug!("環境変数 {} を起動時の環境変数から取得しました", $var_name);
            Ok(value)
        } else if let Some(value) = option_env!($var_name) {
            log::debug!("環境変数 {} をコンパイル時の環境変数から取得しました", $var_name);
            Ok(value.to_string())
        } else {
            Err($crate::shared::config::environment::EnvVarError {
                var_name: $var_name.to_string(),
                message: format!(
                    "起動時の環境変数 {} もコンパイル時の環境変数も見つかりませんでした",
                    $var_name
                ),
            })
        }
    }};
}

/// 環境変数を取得する（デフォルト値付き）
#[macro_export]
macro_rules! get_env_var_or_default {
    ($var_name:expr, $default_value:expr) => {{
        $crate::get_env_var!($var_name).unwrap_or_else(|_| {
            log::debug!(
                "環境変数 {} が見つからないため、デフォルト値を使用します: {}",
                $var_name,
                $default_value
            );
            $default_value.to_string()
        })
    }};
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: String,
    /// デバッグモードの有効/無効
    pub debug_mode: bool,
    /// ログレベル
    pub log_level: String,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        let environment = get_environment();
        let debug_mode = environment == Environment::Development;
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
            if debug_mode {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

        Self {
            environment: format!("{environment:?}").to_lowercase(),
            debug_mode,
            log_level,
        }
    }

    /// プロダクション環境かどうかを判定
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 開発環境かどうかを判定
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 設定文字列からログレベルを決定する
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}

/// 現在の実行環境を判定する
///
/// # 判定ロジック
/// 1. 実行時環境変数 ENVIRONMENT を確認
/// 2. デバッグビルドの場合は Development
/// 3. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        let env = match env_var.as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
        log::debug!("環境判定: 実行時環境変数を使用 -> {env_var} -> {env:?}");
        return env;
    }

    let env = if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    };
    log::debug!(
        "環境判定: ビルド設定を使用 -> debug_assertions={} -> {env:?}",
        cfg!(debug_assertions)
    );
    env
}

/// 環境変数の読み込みを確認する
///
/// 開発ビルドの場合のみ.envファイルを読み込む。
/// 本番ビルドでは環境変数が実行時に設定されていることを前提とする。
pub fn load_environment_variables() {
    if cfg!(debug_assertions) {
        match dotenv::dotenv() {
            Ok(path) => {
                log::info!("環境ファイルを読み込みました: {}", path.display());
            }
            Err(e) => {
                log::warn!("環境ファイルの読み込みに失敗: {e}");
            }
        }
    } else {
        log::info!("本番環境: 環境変数は実行時に設定されます");
    }
}

/// ログシステムを初期化する
///
/// 既に初期化済みの場合は何もしない（テストから複数回呼ばれるため）。
pub fn initialize_logging_system() {
    let env_config = EnvironmentConfig::from_env();

    let initialized = env_logger::Builder::from_default_env()
        .filter_level(env_config.level_filter())
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init()
        .is_ok();

    if initialized {
        log::info!(
            "ログシステムを初期化しました: level={}, environment={}",
            env_config.log_level,
            env_config.environment
        );
    }
}

/// API設定を管理する構造体
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// APIサーバーのベースURL
    pub base_url: String,
    /// APIリクエストのタイムアウト（秒）。Noneの場合はタイムアウトなし
    pub timeout_seconds: Option<u64>,
}

impl ApiConfig {
    /// ベースURLを指定してAPI設定を作成する
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_seconds: None,
        }
    }

    /// 環境変数からAPI設定を読み込む
    ///
    /// # エラー
    /// API_SERVER_URL が見つからない場合は設定エラー
    pub fn from_env() -> AppResult<Self> {
        let base_url = crate::get_env_var!("API_SERVER_URL").map_err(|e| {
            log::error!("API_SERVER_URLの取得に失敗しました: {e}");
            AppError::from(e)
        })?;

        // 0 または未設定はタイムアウトなしとして扱う
        let timeout_seconds = crate::get_env_var_or_default!("API_TIMEOUT_SECONDS", "0")
            .parse::<u64>()
            .unwrap_or_else(|_| {
                log::warn!("API_TIMEOUT_SECONDSのパースに失敗しました。タイムアウトなしで続行します");
                0
            });

        let config = Self {
            timeout_seconds: (timeout_seconds > 0).then_some(timeout_seconds),
            ..Self::new(base_url)
        };
        config.validate()?;

        log::info!(
            "API設定: base_url={}, timeout={:?}",
            config.base_url,
            config.timeout_seconds
        );
        Ok(config)
    }

    /// 設定を検証する
    pub fn validate(&self) -> AppResult<()> {
        if self.base_url.is_empty() {
            return Err(AppError::configuration(
                "APIサーバーのベースURLが設定されていません",
            ));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AppError::configuration(format!(
                "APIサーバーのベースURLはhttp(s)で始まる必要があります: {}",
                self.base_url
            )));
        }

        Ok(())
    }

    /// APIサーバーがlocalhostかどうかを判定
    pub fn is_localhost(&self) -> bool {
        self.base_url.contains("localhost") || self.base_url.contains("127.0.0.1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_equality() {
        assert_eq!(Environment::Development, Environment::Development);
        assert_ne!(Environment::Development, Environment::Production);
    }

    #[test]
    fn test_environment_config_methods() {
        let dev_config = EnvironmentConfig {
            environment: "development".to_string(),
            debug_mode: true,
            log_level: "debug".to_string(),
        };

        let prod_config = EnvironmentConfig {
            environment: "production".to_string(),
            debug_mode: false,
            log_level: "WARN".to_string(),
        };

        assert!(dev_config.is_development());
        assert!(!dev_config.is_production());
        assert_eq!(dev_config.level_filter(), log::LevelFilter::Debug);

        assert!(prod_config.is_production());
        assert_eq!(prod_config.level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let config = EnvironmentConfig {
            environment: "development".to_string(),
            debug_mode: true,
            log_level: "verbose".to_string(),
        };
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_api_config_trims_trailing_slash() {
        let config = ApiConfig::new("https://bills.example.com/api/");
        assert_eq!(config.base_url, "https://bills.example.com/api");
        assert_eq!(config.timeout_seconds, None);
        assert!(config.validate().is_ok());
        assert!(!config.is_localhost());
    }

    #[test]
    fn test_api_config_validation() {
        let empty = ApiConfig::new("");
        assert!(matches!(empty.validate(), Err(AppError::Configuration(_))));

        let no_scheme = ApiConfig::new("bills.example.com");
        assert!(matches!(
            no_scheme.validate(),
            Err(AppError::Configuration(_))
        ));

        let local = ApiConfig::new("http://127.0.0.1:8080");
        assert!(local.is_localhost());
    }

    #[test]
    fn test_initialize_logging_twice() {
        // 二回目の初期化でパニックしないことを確認
        initialize_logging_system();
        initialize_logging_system();
    }
}
