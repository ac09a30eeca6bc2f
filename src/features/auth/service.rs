/// APIサーバー経由の認証サービス
///
/// メールアドレスとパスワードでログイン・ユーザー登録を行い、
/// 成功したログインの結果をセッションコンテキストに保存する。
use crate::features::auth::models::{
    LoginRequest, LoginResponse, RegisterForm, RegisterResponse, Session,
};
use crate::features::auth::session::SessionContext;
use crate::shared::api_client::ApiClient;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::validate_required_field;
use log::{info, warn};

#[derive(Clone)]
pub struct AuthService {
    api_client: ApiClient,
    session: SessionContext,
}

impl AuthService {
    pub fn new(api_client: ApiClient, session: SessionContext) -> Self {
        Self {
            api_client,
            session,
        }
    }

    /// ログインしてセッションを確立する
    ///
    /// # 引数
    /// * `email` - メールアドレス
    /// * `password` - パスワード
    ///
    /// # 戻り値
    /// 確立したセッション
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        validate_required_field(email, "メールアドレス")?;
        validate_required_field(password, "パスワード")?;

        info!("ログインを開始します: email={email}");

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.api_client.post("/auth/login", &request, None).await?;

        let session = response.into_session().map_err(|e| {
            warn!("ログインが拒否されました: email={email}");
            e
        })?;

        self.session.set(session.clone());
        info!("ログインしました: user_id={}", session.user_id);
        Ok(session)
    }

    /// ユーザー登録を行う
    ///
    /// 登録してもログイン状態にはならない。
    ///
    /// # 戻り値
    /// サーバーが返したメッセージ（ない場合は既定の完了メッセージ）
    pub async fn register(&self, form: &RegisterForm) -> AppResult<String> {
        form.validate()?;

        info!("ユーザー登録を開始します: email={}", form.email);

        let response: RegisterResponse = self
            .api_client
            .post("/auth/register", &form.to_request(), None)
            .await?;

        if !response.is_success() {
            warn!("ユーザー登録が拒否されました: email={}", form.email);
            return Err(AppError::validation(response.failure_message()));
        }

        info!("ユーザー登録が完了しました: email={}", form.email);
        Ok(response
            .message
            .unwrap_or_else(|| "ユーザー登録が完了しました。ログインしてください".to_string()))
    }

    /// ログアウトしてセッションを破棄する
    pub fn logout(&self) {
        self.session.clear();
        info!("ログアウトしました");
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}
