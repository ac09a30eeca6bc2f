/// OCR明細の取り込み・保存コマンド
use crate::features::ocr::buffer::ReconciliationBuffer;
use crate::features::ocr::service;
use crate::features::receipts::models::{Receipt, UpdateReceiptDto};
use crate::features::receipts::repository;
use crate::shared::api_client::ImageUpload;
use crate::shared::errors::AppResult;
use crate::AppState;
use log::{error, info};
use std::path::Path;

/// 領収書画像から明細を抽出し、編集バッファを作成する
///
/// # 引数
/// * `image` - 領収書画像
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 抽出結果を取り込んだバッファ（抽出結果が0件の場合は空）
pub async fn extract_bills(
    image: &ImageUpload,
    state: &AppState,
) -> Result<ReconciliationBuffer, String> {
    extract_bills_internal(image, state).await.map_err(|e| {
        error!("OCR明細の抽出に失敗しました: filename={}, error={}", image.filename, e.details());
        e.into()
    })
}

/// 画像ファイルを読み込んで明細を抽出する
pub async fn extract_bills_from_file<P: AsRef<Path>>(
    path: P,
    state: &AppState,
) -> Result<ReconciliationBuffer, String> {
    let path = path.as_ref();
    let result = async {
        let image = ImageUpload::from_path(path).await?;
        extract_bills_internal(&image, state).await
    }
    .await;

    result.map_err(|e| {
        error!("OCR明細の抽出に失敗しました: path={}, error={}", path.display(), e.details());
        e.into()
    })
}

/// 編集済みの明細を保存する
///
/// 保存済みIDのある行は更新、ない行は新規作成する。
/// 保存できた行はその都度バッファから取り除くため、途中で失敗した場合は
/// 未保存の行だけが残る。
///
/// # 引数
/// * `buffer` - 編集バッファ
/// * `category_name` - 登録先カテゴリー名
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 保存された領収書、または失敗時はエラーメッセージ
pub async fn commit_bills(
    buffer: &mut ReconciliationBuffer,
    category_name: &str,
    state: &AppState,
) -> Result<Vec<Receipt>, String> {
    match commit_bills_internal(buffer, category_name, state).await {
        Ok(saved) => {
            info!("OCR明細を保存しました: category={category_name}, count={}", saved.len());
            Ok(saved)
        }
        Err(e) => {
            error!(
                "OCR明細の保存に失敗しました: category={category_name}, remaining={}, error={}",
                buffer.len(),
                e.details()
            );
            Err(e.into())
        }
    }
}

async fn extract_bills_internal(
    image: &ImageUpload,
    state: &AppState,
) -> AppResult<ReconciliationBuffer> {
    let session = state.auth_middleware.authenticate_request("/ocr")?;
    let items = service::extract_line_items(&state.api_client, &session.token, image).await?;

    let mut buffer = ReconciliationBuffer::new();
    buffer.populate(items)?;
    Ok(buffer)
}

async fn commit_bills_internal(
    buffer: &mut ReconciliationBuffer,
    category_name: &str,
    state: &AppState,
) -> AppResult<Vec<Receipt>> {
    let session = state.auth_middleware.authenticate_request("/receipts")?;
    let pending = buffer.prepare_commit(&session.user_id, category_name)?;

    let mut saved = Vec::with_capacity(pending.len());
    for item in pending {
        let receipt = match &item.receipt_id {
            Some(receipt_id) => {
                let dto = UpdateReceiptDto::from(item.dto.clone());
                repository::update(&state.api_client, &session.token, receipt_id, &dto).await?
            }
            None => repository::create(&state.api_client, &session.token, &item.dto).await?,
        };
        buffer.mark_persisted(&item.row_id)?;
        saved.push(receipt);
    }

    buffer.complete_commit()?;
    Ok(saved)
}
