/// 環境変数・ログ・API設定
pub mod environment;

/// 起動時の初期化処理
pub mod initialization;

pub use environment::{
    get_environment, initialize_logging_system, load_environment_variables, ApiConfig,
    Environment, EnvironmentConfig,
};
pub use initialization::{initialize_application, log_initialization_complete, InitializationResult};
