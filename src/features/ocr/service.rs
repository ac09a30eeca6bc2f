use crate::features::ocr::models::{OcrResponse, RawLineItem};
use crate::shared::api_client::{ApiClient, ImageUpload};
use crate::shared::errors::AppResult;
use log::info;

/// 領収書画像をOCRサービスに送信して明細を抽出する
///
/// # 引数
/// * `api_client` - APIクライアント
/// * `token` - Bearerトークン
/// * `image` - 領収書画像
///
/// # 戻り値
/// 抽出された明細（ない場合は空）
pub async fn extract_line_items(
    api_client: &ApiClient,
    token: &str,
    image: &ImageUpload,
) -> AppResult<Vec<RawLineItem>> {
    let response: OcrResponse = api_client.upload_image("/ocr", image, Some(token)).await?;
    let items = response.into_line_items();
    info!("OCRで明細を抽出しました: filename={}, count={}", image.filename, items.len());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::ApiConfig;
    use crate::test_utils::{StubResponse, StubServer};

    #[tokio::test]
    async fn test_extract_line_items() {
        let server = StubServer::start(vec![StubResponse::json(
            200,
            r#"{"saved":[{"itemName":"Coffee","amount":50}]}"#,
        )])
        .await;
        let client = ApiClient::new(ApiConfig::new(server.base_url())).unwrap();
        let image = ImageUpload::new("bill.jpg", b"img".to_vec());

        let items = extract_line_items(&client, "tok", &image).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_name.as_deref(), Some("Coffee"));

        let request = &server.requests()[0];
        assert_eq!(request.path, "/ocr");
        assert_eq!(request.authorization.as_deref(), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_extract_failure_uses_body() {
        let server = StubServer::start(vec![StubResponse::text(422, "Unreadable image")]).await;
        let client = ApiClient::new(ApiConfig::new(server.base_url())).unwrap();
        let image = ImageUpload::new("bill.jpg", vec![]);

        let err = extract_line_items(&client, "tok", &image).await.unwrap_err();
        assert_eq!(err.user_message(), "Unreadable image");
    }
}
