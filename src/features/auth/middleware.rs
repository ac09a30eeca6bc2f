/// 認証ミドルウェア
///
/// 認証が必要なAPI呼び出しの前にセッションの有無を確認する。
/// セッションがない場合はネットワーク通信を行わずに失敗させる。
use crate::features::auth::models::Session;
use crate::features::auth::session::SessionContext;
use crate::shared::errors::AppResult;
use log::{debug, warn};

#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    session: SessionContext,
}

impl AuthMiddleware {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    /// リクエストを認証する
    ///
    /// # 引数
    /// * `request_path` - 呼び出し予定のエンドポイント（ログ用）
    ///
    /// # 戻り値
    /// 現在のセッション、未ログインの場合は認証エラー
    pub fn authenticate_request(&self, request_path: &str) -> AppResult<Session> {
        match self.session.require() {
            Ok(session) => {
                debug!(
                    "認証済みリクエスト: path={request_path}, user_id={}",
                    session.user_id
                );
                Ok(session)
            }
            Err(e) => {
                warn!("未認証のリクエストを拒否しました: path={request_path}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::AppError;

    #[test]
    fn test_authenticate_request() {
        let session = SessionContext::new();
        let middleware = AuthMiddleware::new(session.clone());

        assert!(matches!(
            middleware.authenticate_request("/receipts"),
            Err(AppError::Authentication(_))
        ));

        session.set(Session::new("token", "u1"));
        let authenticated = middleware.authenticate_request("/receipts").unwrap();
        assert_eq!(authenticated.token, "token");
    }
}
