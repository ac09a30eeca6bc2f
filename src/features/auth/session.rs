/// セッションコンテキスト
///
/// ログイン時に一度だけ書き込まれ、以降のすべてのAPI呼び出しから読み取られる。
/// ログアウトで明示的にクリアする。
use crate::features::auth::models::Session;
use crate::shared::errors::{AppError, AppResult};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// ログイン結果を保存する
    pub fn set(&self, session: Session) {
        log::debug!("セッションを設定しました: user_id={}", session.user_id);
        match self.inner.write() {
            Ok(mut guard) => *guard = Some(session),
            Err(poisoned) => *poisoned.into_inner() = Some(session),
        }
    }

    /// セッションを破棄する
    pub fn clear(&self) {
        match self.inner.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
        log::debug!("セッションをクリアしました");
    }

    /// 現在のセッションを取得する
    pub fn current(&self) -> Option<Session> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// セッションを取得する。未ログインの場合は認証エラー
    pub fn require(&self) -> AppResult<Session> {
        self.current()
            .ok_or_else(|| AppError::authentication("ログインが必要です"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let context = SessionContext::new();
        assert!(!context.is_authenticated());
        assert!(matches!(context.require(), Err(AppError::Authentication(_))));

        context.set(Session::new("token", "u1"));
        assert_eq!(context.require().unwrap().user_id, "u1");

        context.clear();
        assert!(context.current().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let context = SessionContext::new();
        let shared = context.clone();
        context.set(Session::new("token", "u1"));
        assert_eq!(shared.current(), Some(Session::new("token", "u1")));
    }

    #[tokio::test]
    async fn test_readable_from_other_tasks() {
        let context = SessionContext::new();
        context.set(Session::new("token", "u2"));
        let reader = context.clone();
        let user_id = tokio::spawn(async move { reader.require().map(|s| s.user_id) })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user_id, "u2");
    }
}
