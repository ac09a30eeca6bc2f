/// 認証コマンド
///
/// 画面から呼び出される入口。失敗はユーザー向けメッセージに変換して返す。
use crate::features::auth::models::{RegisterForm, Session};
use crate::features::auth::service::AuthService;
use crate::AppState;
use log::error;

/// ログインする
///
/// # 戻り値
/// 確立したセッション、または失敗時はエラーメッセージ
pub async fn login(email: &str, password: &str, state: &AppState) -> Result<Session, String> {
    let service = AuthService::new(state.api_client.clone(), state.session.clone());
    service.login(email, password).await.map_err(|e| {
        error!("ログインに失敗しました: {}", e.details());
        e.into()
    })
}

/// ユーザーを登録する
///
/// # 戻り値
/// 完了メッセージ、または失敗時はエラーメッセージ
pub async fn register(form: &RegisterForm, state: &AppState) -> Result<String, String> {
    let service = AuthService::new(state.api_client.clone(), state.session.clone());
    service.register(form).await.map_err(|e| {
        error!("ユーザー登録に失敗しました: {}", e.details());
        e.into()
    })
}

/// ログアウトする
pub fn logout(state: &AppState) {
    AuthService::new(state.api_client.clone(), state.session.clone()).logout();
}

/// 現在のログインユーザーIDを取得する
pub fn current_user_id(state: &AppState) -> Option<String> {
    state.session.current().map(|session| session.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{StubResponse, StubServer};

    #[tokio::test]
    async fn test_login_and_logout_through_state() {
        let server = StubServer::start(vec![StubResponse::json(
            200,
            r#"{"token":"jwt","user":{"_id":"u-9"}}"#,
        )])
        .await;
        let state = AppState::for_base_url(&server.base_url()).unwrap();

        let session = login("c@example.com", "pw", &state).await.unwrap();
        assert_eq!(session.user_id, "u-9");
        assert_eq!(current_user_id(&state).as_deref(), Some("u-9"));

        logout(&state);
        assert_eq!(current_user_id(&state), None);
    }

    #[tokio::test]
    async fn test_register_failure_message() {
        let server = StubServer::start(vec![StubResponse::json(
            200,
            r#"{"message":"Email already exists"}"#,
        )])
        .await;
        let state = AppState::for_base_url(&server.base_url()).unwrap();
        let form = RegisterForm {
            email: "c@example.com".to_string(),
            password: "pw".to_string(),
            confirm_password: "pw".to_string(),
            name: "C".to_string(),
        };

        let err = register(&form, &state).await.unwrap_err();
        assert_eq!(err, "Email already exists");
    }
}
