use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// ログイン後に保持する認証情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearerトークン
    pub token: String,
    /// ログインユーザーのID
    pub user_id: String,
}

impl Session {
    pub fn new<T: Into<String>, U: Into<String>>(token: T, user_id: U) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
        }
    }
}

/// ログインリクエスト
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// ログインレスポンスに含まれるユーザー情報
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// ログインレスポンス
///
/// 失敗時は `message` のみが返される。
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub user: Option<LoginUser>,
    pub message: Option<String>,
}

impl LoginResponse {
    /// トークンとユーザーIDが揃っている場合のみセッションに変換する
    pub fn into_session(self) -> AppResult<Session> {
        let user_id = self.user.and_then(|user| user.id);
        match (self.token, user_id) {
            (Some(token), Some(user_id)) if !token.is_empty() && !user_id.is_empty() => {
                Ok(Session { token, user_id })
            }
            _ => Err(AppError::authentication(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "メールアドレスまたはパスワードが正しくありません".to_string()),
            )),
        }
    }
}

/// ユーザー登録リクエスト
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// ユーザー登録レスポンス
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub success: Option<bool>,
    pub token: Option<String>,
    pub message: Option<String>,
}

impl RegisterResponse {
    /// 登録が成功したかどうか
    ///
    /// `success`、`token`、または "registered" を含むメッセージのいずれかで成功とみなす。
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(false)
            || self.token.as_deref().is_some_and(|t| !t.is_empty())
            || self
                .message
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains("registered"))
    }

    /// 失敗時に表示するメッセージ
    pub fn failure_message(&self) -> String {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "ユーザー登録に失敗しました".to_string())
    }
}

/// ユーザー登録フォームの入力値
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
}

impl RegisterForm {
    /// 送信前の入力チェック
    pub fn validate(&self) -> AppResult<()> {
        if self.password != self.confirm_password {
            return Err(AppError::validation("パスワードが一致しません"));
        }
        Ok(())
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
        }
    }
}
