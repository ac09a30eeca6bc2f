use crate::features::categories::models::{Category, CreateCategoryDto, UpdateCategoryDto};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use serde_json::Value;

/// カテゴリーを作成する
///
/// # 引数
/// * `api_client` - APIクライアント
/// * `token` - Bearerトークン
/// * `dto` - カテゴリー作成用DTO
///
/// # 戻り値
/// 作成されたカテゴリー、または失敗時はエラー
pub async fn create(api_client: &ApiClient, token: &str, dto: &CreateCategoryDto) -> AppResult<Category> {
    let category: Category = api_client.post("/categories", dto, Some(token)).await?;
    log::info!("カテゴリーを作成しました: id={}, name={}", category.id, category.name);
    Ok(category)
}

/// IDでカテゴリーを取得する
pub async fn find_by_id(api_client: &ApiClient, token: &str, id: &str) -> AppResult<Category> {
    api_client.get(&category_path(id), Some(token)).await
}

/// カテゴリー一覧を取得する
pub async fn find_all(api_client: &ApiClient, token: &str) -> AppResult<Vec<Category>> {
    let categories: Vec<Category> = api_client.get("/categories", Some(token)).await?;
    log::debug!("カテゴリー一覧を取得しました: count={}", categories.len());
    Ok(categories)
}

/// カテゴリーを更新する
///
/// 領収書側のカテゴリー名は書き換えない。
pub async fn update(
    api_client: &ApiClient,
    token: &str,
    id: &str,
    dto: &UpdateCategoryDto,
) -> AppResult<Category> {
    let category: Category = api_client.put(&category_path(id), dto, Some(token)).await?;
    log::info!("カテゴリーを更新しました: id={id}");
    Ok(category)
}

/// カテゴリーを削除する
pub async fn delete(api_client: &ApiClient, token: &str, id: &str) -> AppResult<Value> {
    let response: Value = api_client.delete(&category_path(id), Some(token)).await?;
    log::info!("カテゴリーを削除しました: id={id}");
    Ok(response)
}

fn category_path(id: &str) -> String {
    format!("/categories/{}", urlencoding::encode(id))
}
