/// API Server経由でのカテゴリー操作コマンド
use crate::features::categories::models::*;
use crate::features::categories::repository;
use crate::AppState;
use log::{error, info};

/// カテゴリー一覧を取得する
///
/// # 戻り値
/// カテゴリー一覧、または失敗時はエラーメッセージ
pub async fn get_categories(state: &AppState) -> Result<Vec<Category>, String> {
    let result = async {
        let session = state.auth_middleware.authenticate_request("/categories")?;
        repository::find_all(&state.api_client, &session.token).await
    }
    .await;

    match result {
        Ok(categories) => {
            info!("カテゴリー一覧取得成功: count={}", categories.len());
            Ok(categories)
        }
        Err(e) => {
            error!("カテゴリー一覧取得に失敗しました: {}", e.details());
            Err(e.into())
        }
    }
}

/// IDでカテゴリーを取得する
pub async fn get_category(id: &str, state: &AppState) -> Result<Category, String> {
    let result = async {
        let session = state
            .auth_middleware
            .authenticate_request(&format!("/categories/{id}"))?;
        repository::find_by_id(&state.api_client, &session.token, id).await
    }
    .await;

    result.map_err(|e| {
        error!("カテゴリー取得に失敗しました: id={id}, error={}", e.details());
        e.into()
    })
}

/// カテゴリーを追加する
///
/// 入力チェックに失敗した場合はAPIサーバーを呼び出さない。
///
/// # 引数
/// * `form` - カテゴリー追加フォーム
/// * `state` - アプリケーション状態
pub async fn create_category(form: &CategoryForm, state: &AppState) -> Result<Category, String> {
    let result = async {
        let session = state.auth_middleware.authenticate_request("/categories")?;
        let dto = form.to_dto(&session.user_id)?;
        repository::create(&state.api_client, &session.token, &dto).await
    }
    .await;

    result.map_err(|e| {
        error!("カテゴリー作成に失敗しました: {}", e.details());
        e.into()
    })
}

/// カテゴリー名を変更する
pub async fn rename_category(id: &str, name: &str, state: &AppState) -> Result<Category, String> {
    let dto = UpdateCategoryDto {
        name: Some(name.trim().to_string()),
        description: None,
    };
    update_category(id, &dto, state).await
}

/// カテゴリーを更新する
pub async fn update_category(
    id: &str,
    dto: &UpdateCategoryDto,
    state: &AppState,
) -> Result<Category, String> {
    let result = async {
        let session = state
            .auth_middleware
            .authenticate_request(&format!("/categories/{id}"))?;
        repository::update(&state.api_client, &session.token, id, dto).await
    }
    .await;

    result.map_err(|e| {
        error!("カテゴリー更新に失敗しました: id={id}, error={}", e.details());
        e.into()
    })
}

/// カテゴリーを削除する
pub async fn delete_category(id: &str, state: &AppState) -> Result<(), String> {
    let result = async {
        let session = state
            .auth_middleware
            .authenticate_request(&format!("/categories/{id}"))?;
        repository::delete(&state.api_client, &session.token, id).await
    }
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("カテゴリー削除に失敗しました: id={id}, error={}", e.details());
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::Session;
    use crate::shared::screen::ScreenState;
    use crate::test_utils::{StubResponse, StubServer};

    const CATEGORIES_JSON: &str = r#"[{"_id":"c1","name":"Food","user_id":"u1"}]"#;

    async fn logged_in_state(server: &StubServer) -> AppState {
        let state = AppState::for_base_url(&server.base_url()).unwrap();
        state.session.set(Session::new("tok", "u1"));
        state
    }

    #[tokio::test]
    async fn test_create_category_sends_session_user() {
        let server = StubServer::start(vec![StubResponse::json(
            201,
            r#"{"_id":"c2","name":"Travel","description":"trips","user_id":"u1"}"#,
        )])
        .await;
        let state = logged_in_state(&server).await;

        let created = create_category(&CategoryForm::new("Travel", " trips "), &state)
            .await
            .unwrap();
        assert_eq!(created.id, "c2");

        let request = &server.requests()[0];
        assert_eq!(request.authorization.as_deref(), Some("Bearer tok"));
        assert_eq!(
            request.json(),
            serde_json::json!({"name": "Travel", "description": "trips", "user_id": "u1"})
        );
    }

    #[tokio::test]
    async fn test_create_category_short_name_skips_network() {
        let server = StubServer::start(vec![]).await;
        let state = logged_in_state(&server).await;

        let err = create_category(&CategoryForm::new("x", ""), &state)
            .await
            .unwrap_err();
        assert_eq!(err, "カテゴリー名は2文字以上で入力してください");
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_category_requires_login() {
        let server = StubServer::start(vec![]).await;
        let state = AppState::for_base_url(&server.base_url()).unwrap();

        let err = create_category(&CategoryForm::new("Travel", ""), &state)
            .await
            .unwrap_err();
        assert_eq!(err, "ログインが必要です");
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_rename_category() {
        let server = StubServer::start(vec![StubResponse::json(
            200,
            r#"{"_id":"c1","name":"Meals","user_id":"u1"}"#,
        )])
        .await;
        let state = logged_in_state(&server).await;

        let renamed = rename_category("c1", " Meals ", &state).await.unwrap();
        assert_eq!(renamed.name, "Meals");
        assert_eq!(server.requests()[0].body, r#"{"name":"Meals"}"#);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_category_list() {
        let server = StubServer::start(vec![
            StubResponse::json(200, CATEGORIES_JSON),
            StubResponse::text(403, "Forbidden"),
        ])
        .await;
        let state = logged_in_state(&server).await;
        let mut screen: ScreenState<Vec<Category>> = ScreenState::default();

        assert!(screen.load("Error", get_categories(&state)).await);
        let deleted = screen.perform("Error", delete_category("c1", &state)).await;

        assert!(deleted.is_none());
        assert_eq!(screen.data().len(), 1);
        assert_eq!(screen.alert().map(|a| a.message.as_str()), Some("Forbidden"));
    }
}
