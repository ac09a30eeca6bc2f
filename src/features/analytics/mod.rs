/// 分析データ機能モジュール
///
/// APIサーバーが集計した分析データを取得する。内容はサーバー側の形式のまま扱う。
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use crate::AppState;
use log::{debug, error};
use serde_json::Value;

/// 分析データを取得する
pub async fn fetch_analytics(api_client: &ApiClient, token: &str) -> AppResult<Value> {
    let analytics: Value = api_client.get("/analytics", Some(token)).await?;
    debug!("分析データを取得しました");
    Ok(analytics)
}

/// 分析データを取得するコマンド
pub async fn get_analytics(state: &AppState) -> Result<Value, String> {
    let result = async {
        let session = state.auth_middleware.authenticate_request("/analytics")?;
        fetch_analytics(&state.api_client, &session.token).await
    }
    .await;

    result.map_err(|e| {
        error!("分析データ取得に失敗しました: {}", e.details());
        e.into()
    })
}
