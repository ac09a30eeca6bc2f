/// 共有エラー型とエラーハンドリング
pub mod errors;

/// 共有設定管理
pub mod config;

/// APIサーバーとの通信
pub mod api_client;

/// 画面境界の状態管理
pub mod screen;

/// 共有ユーティリティ関数
pub mod utils;

// 便利な再エクスポート
pub use api_client::{ApiClient, ImageUpload};
pub use config::{
    get_environment, initialize_application, initialize_logging_system,
    load_environment_variables, log_initialization_complete, ApiConfig, Environment,
    EnvironmentConfig, InitializationResult,
};
pub use errors::{AppError, AppResult, ErrorSeverity};
pub use screen::{Alert, ScreenState};
