use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// バリデーション関連のエラー（ネットワーク送信前に検出）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 認証関連のエラー（セッション未確立・認証情報の拒否）
    #[error("認証エラー: {0}")]
    Authentication(String),

    /// APIサーバーが成功以外のステータスを返した場合のエラー
    #[error("APIサーバーエラー: status={status}, message={message}")]
    Api { status: u16, message: String },

    /// APIサーバーへの接続失敗
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// リソースが見つからない場合のエラー
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 現在の状態では実行できない操作
    #[error("状態エラー: {0}")]
    InvalidState(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（外部サービス一時的エラーなど）
    Medium,
    /// 高重要度（設定エラーなど）
    High,
    /// 最重要（認証エラーなど）
    Critical,
}

impl AppError {
    /// ユーザーに表示するためのフレンドリーなメッセージを取得
    ///
    /// APIエラーはサーバーが返した本文をそのまま表示する。
    /// 本文が空の場合のみ汎用メッセージを返す。
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Validation(msg) => msg,
            AppError::Authentication(msg) => msg,
            AppError::Api { message, .. } if !message.trim().is_empty() => message,
            AppError::Api { .. } => "サーバーとの通信でエラーが発生しました",
            AppError::Network(_) => "サーバーに接続できませんでした",
            AppError::NotFound(msg) => msg,
            AppError::InvalidState(msg) => msg,
            AppError::Configuration(_) => "設定エラーが発生しました",
            AppError::Io(_) => "ファイル操作でエラーが発生しました",
            AppError::Json(_) => "データ形式の解析でエラーが発生しました",
        }
    }

    /// エラーの詳細情報を取得（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::NotFound(_) => ErrorSeverity::Low,
            AppError::InvalidState(_) => ErrorSeverity::Low,
            AppError::Api { .. } => ErrorSeverity::Medium,
            AppError::Network(_) => ErrorSeverity::Medium,
            AppError::Io(_) => ErrorSeverity::Medium,
            AppError::Json(_) => ErrorSeverity::Medium,
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Authentication(_) => ErrorSeverity::Critical,
        }
    }

    /// バリデーションエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - バリデーションエラーメッセージ
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// 認証エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - 認証エラーメッセージ
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        AppError::Authentication(message.into())
    }

    /// リソース未発見エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `resource` - 見つからなかったリソース名
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        AppError::NotFound(format!("{}が見つかりません", resource.into()))
    }

    /// 状態エラーを作成するヘルパー関数
    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        AppError::InvalidState(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - 設定エラーメッセージ
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}

/// AppErrorからStringへの変換（コマンド境界での使用のため）
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.user_message().to_string()
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;
