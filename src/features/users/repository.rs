use crate::features::users::models::{UpdateUserDto, User};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use serde_json::Value;

/// ユーザー一覧を取得する
pub async fn find_all(api_client: &ApiClient, token: &str) -> AppResult<Vec<User>> {
    api_client.get("/users", Some(token)).await
}

/// IDでユーザーを取得する
pub async fn find_by_id(api_client: &ApiClient, token: &str, id: &str) -> AppResult<User> {
    api_client.get(&user_path(id), Some(token)).await
}

/// ユーザー情報を更新する
pub async fn update(
    api_client: &ApiClient,
    token: &str,
    id: &str,
    dto: &UpdateUserDto,
) -> AppResult<User> {
    let user: User = api_client.put(&user_path(id), dto, Some(token)).await?;
    log::info!("ユーザー情報を更新しました: id={id}");
    Ok(user)
}

/// ユーザーを削除する
pub async fn delete(api_client: &ApiClient, token: &str, id: &str) -> AppResult<Value> {
    let response: Value = api_client.delete(&user_path(id), Some(token)).await?;
    log::info!("ユーザーを削除しました: id={id}");
    Ok(response)
}

fn user_path(id: &str) -> String {
    format!("/users/{}", urlencoding::encode(id))
}
