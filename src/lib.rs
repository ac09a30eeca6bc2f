// 機能モジュール構造
pub mod features;
pub mod shared;

#[cfg(test)]
mod test_utils;

use features::auth::{AuthMiddleware, SessionContext};
use log::info;
use shared::api_client::ApiClient;
use shared::config::{initialize_application, log_initialization_complete, ApiConfig};
use shared::errors::AppResult;

/// アプリケーション状態（APIクライアントとセッションを保持）
///
/// 複製してもセッションは共有される。
#[derive(Clone)]
pub struct AppState {
    pub api_client: ApiClient,
    pub session: SessionContext,
    pub auth_middleware: AuthMiddleware,
}

impl AppState {
    /// APIクライアントからアプリケーション状態を作成する
    ///
    /// 作成直後は未ログイン状態。
    pub fn new(api_client: ApiClient) -> Self {
        let session = SessionContext::new();
        let auth_middleware = AuthMiddleware::new(session.clone());
        Self {
            api_client,
            session,
            auth_middleware,
        }
    }

    /// API設定からアプリケーション状態を作成する
    pub fn from_config(api_config: ApiConfig) -> AppResult<Self> {
        Ok(Self::new(ApiClient::new(api_config)?))
    }

    #[cfg(test)]
    pub(crate) fn for_base_url(base_url: &str) -> AppResult<Self> {
        Self::from_config(ApiConfig::new(base_url))
    }
}

/// アプリケーションを初期化する
///
/// 環境変数とログシステムを初期化し、APIサーバーの設定からアプリケーション状態を作成する。
pub fn initialize() -> AppResult<AppState> {
    let result = initialize_application()?;
    log_initialization_complete(&result);

    let state = AppState::from_config(result.api_config)?;
    info!("アプリケーション状態を作成しました: api={}", state.api_client.base_url());
    Ok(state)
}
