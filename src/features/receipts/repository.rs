use crate::features::receipts::models::{CreateReceiptDto, Receipt, UpdateReceiptDto};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use serde_json::Value;

/// 領収書を作成する
///
/// # 引数
/// * `api_client` - APIクライアント
/// * `token` - Bearerトークン
/// * `dto` - 領収書作成用DTO
///
/// # 戻り値
/// 作成された領収書、または失敗時はエラー
pub async fn create(api_client: &ApiClient, token: &str, dto: &CreateReceiptDto) -> AppResult<Receipt> {
    let receipt: Receipt = api_client.post("/receipts", dto, Some(token)).await?;
    log::info!("領収書を作成しました: id={}", receipt.id);
    Ok(receipt)
}

/// IDで領収書を取得する
pub async fn find_by_id(api_client: &ApiClient, token: &str, id: &str) -> AppResult<Receipt> {
    api_client.get(&receipt_path(id), Some(token)).await
}

/// 領収書一覧を取得する
///
/// サーバーの返却順をそのまま保持する。
pub async fn find_all(api_client: &ApiClient, token: &str) -> AppResult<Vec<Receipt>> {
    let receipts: Vec<Receipt> = api_client.get("/receipts", Some(token)).await?;
    log::debug!("領収書一覧を取得しました: count={}", receipts.len());
    Ok(receipts)
}

/// 領収書を更新する
pub async fn update(
    api_client: &ApiClient,
    token: &str,
    id: &str,
    dto: &UpdateReceiptDto,
) -> AppResult<Receipt> {
    let receipt: Receipt = api_client.put(&receipt_path(id), dto, Some(token)).await?;
    log::info!("領収書を更新しました: id={id}");
    Ok(receipt)
}

/// 領収書を削除する
///
/// # 戻り値
/// サーバーの応答本文
pub async fn delete(api_client: &ApiClient, token: &str, id: &str) -> AppResult<Value> {
    let response: Value = api_client.delete(&receipt_path(id), Some(token)).await?;
    log::info!("領収書を削除しました: id={id}");
    Ok(response)
}

fn receipt_path(id: &str) -> String {
    format!("/receipts/{}", urlencoding::encode(id))
}
