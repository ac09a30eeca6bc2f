/// 画面境界の状態管理
///
/// コマンドの失敗はここで捕捉してアラートに変換する。
/// 失敗時は直前のデータをそのまま保持し、自動リトライは行わない。
use std::future::Future;

/// ユーザーに表示するアラート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// タイトル
    pub title: String,
    /// 本文
    pub message: String,
}

impl Alert {
    pub fn new<T: Into<String>, M: Into<String>>(title: T, message: M) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// 画面ごとの表示データ・ローディング状態・アラート
#[derive(Debug, Clone)]
pub struct ScreenState<T> {
    data: T,
    loading: bool,
    alert: Option<Alert>,
}

impl<T: Default> Default for ScreenState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> ScreenState<T> {
    /// 初期データを指定して画面状態を作成する
    pub fn new(initial: T) -> Self {
        Self {
            data: initial,
            loading: false,
            alert: None,
        }
    }

    /// 現在の表示データ
    pub fn data(&self) -> &T {
        &self.data
    }

    /// 表示データを直接更新する（ローカル編集用）
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// 通信中かどうか
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 表示中のアラート
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// アラートを閉じる
    pub fn dismiss_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    /// 成功通知などのアラートを表示する
    pub fn notify<S: Into<String>, M: Into<String>>(&mut self, title: S, message: M) {
        self.alert = Some(Alert::new(title, message));
    }

    /// 表示データを取得し直す
    ///
    /// 成功時はデータを置き換え、失敗時はアラートを設定してデータを保持する。
    ///
    /// # 戻り値
    /// 成功した場合はtrue
    pub async fn load<F, E>(&mut self, title: &str, operation: F) -> bool
    where
        F: Future<Output = Result<T, E>>,
        E: Into<String>,
    {
        match self.perform(title, operation).await {
            Some(data) => {
                self.data = data;
                true
            }
            None => false,
        }
    }

    /// 表示データを変更しない操作（作成・削除など）を実行する
    ///
    /// # 戻り値
    /// 成功時は操作結果、失敗時はNone（アラートを設定済み）
    pub async fn perform<R, F, E>(&mut self, title: &str, operation: F) -> Option<R>
    where
        F: Future<Output = Result<R, E>>,
        E: Into<String>,
    {
        self.loading = true;
        let result = operation.await;
        self.loading = false;

        match result {
            Ok(value) => Some(value),
            Err(e) => {
                let message: String = e.into();
                log::warn!("画面操作が失敗しました: title={title}, message={message}");
                self.alert = Some(Alert::new(title, message));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::AppError;

    #[tokio::test]
    async fn test_load_replaces_data_on_success() {
        let mut screen = ScreenState::new(vec![1, 2]);
        let loaded = screen
            .load("読み込みエラー", async { Ok::<_, String>(vec![3]) })
            .await;

        assert!(loaded);
        assert_eq!(screen.data(), &vec![3]);
        assert!(screen.alert().is_none());
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_load_keeps_data_on_failure() {
        let mut screen = ScreenState::new(vec![1, 2]);
        let loaded = screen
            .load("読み込みエラー", async {
                Err::<Vec<i32>, _>(AppError::Api {
                    status: 500,
                    message: "database offline".to_string(),
                })
            })
            .await;

        assert!(!loaded);
        assert_eq!(screen.data(), &vec![1, 2]);
        assert_eq!(
            screen.alert(),
            Some(&Alert::new("読み込みエラー", "database offline"))
        );
        assert!(!screen.is_loading());

        let dismissed = screen.dismiss_alert();
        assert!(dismissed.is_some());
        assert!(screen.alert().is_none());
    }

    #[tokio::test]
    async fn test_perform_returns_value() {
        let mut screen: ScreenState<Vec<i32>> = ScreenState::default();
        let created = screen
            .perform("作成エラー", async { Ok::<_, String>("new-id") })
            .await;
        assert_eq!(created, Some("new-id"));
        assert!(screen.data().is_empty());
    }
}
