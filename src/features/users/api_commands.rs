/// API Server経由でのユーザー操作コマンド
use crate::features::users::models::{UpdateUserDto, User};
use crate::features::users::repository;
use crate::AppState;
use log::error;

/// ユーザー一覧を取得する
pub async fn get_users(state: &AppState) -> Result<Vec<User>, String> {
    let result = async {
        let session = state.auth_middleware.authenticate_request("/users")?;
        repository::find_all(&state.api_client, &session.token).await
    }
    .await;

    result.map_err(|e| {
        error!("ユーザー一覧取得に失敗しました: {}", e.details());
        e.into()
    })
}

/// ログイン中のユーザー情報を取得する
pub async fn get_current_user(state: &AppState) -> Result<User, String> {
    let result = async {
        let session = state.auth_middleware.authenticate_request("/users/me")?;
        repository::find_by_id(&state.api_client, &session.token, &session.user_id).await
    }
    .await;

    result.map_err(|e| {
        error!("ユーザー情報取得に失敗しました: {}", e.details());
        e.into()
    })
}

/// ログイン中のユーザー情報を更新する
pub async fn update_current_user(dto: &UpdateUserDto, state: &AppState) -> Result<User, String> {
    let result = async {
        let session = state.auth_middleware.authenticate_request("/users/me")?;
        repository::update(&state.api_client, &session.token, &session.user_id, dto).await
    }
    .await;

    result.map_err(|e| {
        error!("ユーザー情報更新に失敗しました: {}", e.details());
        e.into()
    })
}

/// ログイン中のユーザーを削除し、セッションを破棄する
pub async fn delete_current_user(state: &AppState) -> Result<(), String> {
    let result = async {
        let session = state.auth_middleware.authenticate_request("/users/me")?;
        repository::delete(&state.api_client, &session.token, &session.user_id).await
    }
    .await;

    match result {
        Ok(_) => {
            state.session.clear();
            Ok(())
        }
        Err(e) => {
            error!("ユーザー削除に失敗しました: {}", e.details());
            Err(e.into())
        }
    }
}
