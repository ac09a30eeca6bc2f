/// APIサーバー経由での領収書操作コマンド
///
/// 認証ミドルウェアでセッションを確認してからAPIサーバーを呼び出す。
/// 失敗はユーザー向けメッセージに変換して返す。
use crate::features::receipts::models::{ManualBillForm, Receipt, UpdateReceiptDto};
use crate::features::receipts::repository;
use crate::features::receipts::summary::{filter_by_user, summarize, ReceiptSummary};
use crate::shared::errors::{AppError, AppResult};
use crate::AppState;
use log::{error, info};

/// 領収書一覧を取得する
///
/// # 戻り値
/// 領収書一覧、または失敗時はエラーメッセージ
pub async fn get_receipts(state: &AppState) -> Result<Vec<Receipt>, String> {
    fetch_receipts(state).await.map_err(|e| {
        error!("領収書一覧取得に失敗しました: {}", e.details());
        e.into()
    })
}

/// IDで領収書を取得する
pub async fn get_receipt(id: &str, state: &AppState) -> Result<Receipt, String> {
    let result = async {
        let session = state.auth_middleware.authenticate_request(&format!("/receipts/{id}"))?;
        repository::find_by_id(&state.api_client, &session.token, id).await
    }
    .await;

    result.map_err(|e| {
        error!("領収書取得に失敗しました: id={id}, error={}", e.details());
        e.into()
    })
}

/// カテゴリー詳細画面の集計を取得する
///
/// # 引数
/// * `category_name` - 集計対象のカテゴリー名
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 集計結果、または失敗時はエラーメッセージ
pub async fn get_category_summary(
    category_name: &str,
    state: &AppState,
) -> Result<ReceiptSummary, String> {
    let result = async {
        let receipts = fetch_receipts(state).await?;
        let user_id = state.session.require()?.user_id;
        summarize(&receipts, &user_id, category_name)
    }
    .await;

    match result {
        Ok(summary) => {
            info!(
                "カテゴリー集計を取得しました: category={category_name}, income={}, expense={}, net={}",
                summary.income, summary.expense, summary.net
            );
            Ok(summary)
        }
        Err(e) => {
            error!("カテゴリー集計に失敗しました: category={category_name}, error={}", e.details());
            Err(e.into())
        }
    }
}

/// 明細履歴を取得する
///
/// ログインユーザーの領収書をサーバーの返却順で返す。カテゴリーでは絞り込まない。
pub async fn get_bill_history(state: &AppState) -> Result<Vec<Receipt>, String> {
    let result = async {
        let receipts = fetch_receipts(state).await?;
        let user_id = state.session.require()?.user_id;
        Ok::<_, AppError>(filter_by_user(&receipts, &user_id))
    }
    .await;

    result.map_err(|e| {
        error!("明細履歴の取得に失敗しました: {}", e.details());
        e.into()
    })
}

/// 手入力の明細を登録する
///
/// 入力チェックに失敗した場合はAPIサーバーを呼び出さない。
///
/// # 引数
/// * `form` - 入力フォーム
/// * `category_name` - 登録先カテゴリー名
/// * `state` - アプリケーション状態
pub async fn create_manual_receipt(
    form: &ManualBillForm,
    category_name: &str,
    state: &AppState,
) -> Result<Receipt, String> {
    let result = async {
        let session = state.auth_middleware.authenticate_request("/receipts")?;
        let dto = form.to_dto(&session.user_id, category_name)?;
        repository::create(&state.api_client, &session.token, &dto).await
    }
    .await;

    result.map_err(|e| {
        error!("明細の登録に失敗しました: category={category_name}, error={}", e.details());
        e.into()
    })
}

/// 領収書を更新する
pub async fn update_receipt(
    id: &str,
    dto: &UpdateReceiptDto,
    state: &AppState,
) -> Result<Receipt, String> {
    let result = async {
        let session = state.auth_middleware.authenticate_request(&format!("/receipts/{id}"))?;
        repository::update(&state.api_client, &session.token, id, dto).await
    }
    .await;

    result.map_err(|e| {
        error!("領収書の更新に失敗しました: id={id}, error={}", e.details());
        e.into()
    })
}

/// 領収書を削除する
pub async fn delete_receipt(id: &str, state: &AppState) -> Result<(), String> {
    let result = async {
        let session = state.auth_middleware.authenticate_request(&format!("/receipts/{id}"))?;
        repository::delete(&state.api_client, &session.token, id).await
    }
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("領収書の削除に失敗しました: id={id}, error={}", e.details());
            Err(e.into())
        }
    }
}

async fn fetch_receipts(state: &AppState) -> AppResult<Vec<Receipt>> {
    let session = state.auth_middleware.authenticate_request("/receipts")?;
    repository::find_all(&state.api_client, &session.token).await
}
