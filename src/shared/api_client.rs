/// 汎用APIクライアント
///
/// バックエンドとの通信を行う汎用的なクライアント。
/// 認証・カテゴリー・領収書・OCRの各エンドポイントで使用する。
/// リトライは行わず、失敗はそのまま呼び出し元に返す。
use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::{AppError, AppResult};
use log::{debug, info, warn};
use reqwest::{multipart, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// アップロードする画像データ
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// ファイル名
    pub filename: String,
    /// 画像のバイト列
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// ファイル名とバイト列から画像データを作成する
    pub fn new<S: Into<String>>(filename: S, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// 画像ファイルを読み込む
    ///
    /// # 引数
    /// * `path` - 画像ファイルのパス
    pub async fn from_path<P: AsRef<std::path::Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("receipt.jpg")
            .to_string();

        debug!("画像ファイルを読み込みました: filename={filename}, size={}", bytes.len());
        Ok(Self { filename, bytes })
    }

    /// ファイル名からContent-Typeを取得
    pub fn content_type(&self) -> &'static str {
        let extension = std::path::Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "png" => "image/png",
            "heic" => "image/heic",
            "webp" => "image/webp",
            // カメラ撮影画像はJPEGとして送信する
            _ => "image/jpeg",
        }
    }
}

/// 汎用APIクライアント
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 設定を指定してAPIクライアントを作成
    pub fn new(config: ApiConfig) -> AppResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let client = builder
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// 環境変数の設定からAPIクライアントを作成
    pub fn from_env() -> AppResult<Self> {
        Self::new(ApiConfig::from_env()?)
    }

    /// APIサーバーのベースURLを取得
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str, auth_token: Option<&str>) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");
        let request = self.client.get(self.url(endpoint));
        self.send(request, auth_token, "GET", endpoint).await
    }

    /// POSTリクエストを送信
    pub async fn post<B, T>(&self, endpoint: &str, body: &B, auth_token: Option<&str>) -> AppResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");
        let request = self.client.post(self.url(endpoint)).json(body);
        self.send(request, auth_token, "POST", endpoint).await
    }

    /// PUTリクエストを送信
    pub async fn put<B, T>(&self, endpoint: &str, body: &B, auth_token: Option<&str>) -> AppResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("PUTリクエスト送信: endpoint={endpoint}");
        let request = self.client.put(self.url(endpoint)).json(body);
        self.send(request, auth_token, "PUT", endpoint).await
    }

    /// DELETEリクエストを送信
    pub async fn delete<T>(&self, endpoint: &str, auth_token: Option<&str>) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("DELETEリクエスト送信: endpoint={endpoint}");
        let request = self.client.delete(self.url(endpoint));
        self.send(request, auth_token, "DELETE", endpoint).await
    }

    /// 画像をマルチパート形式でアップロード
    ///
    /// 画像は `image` フィールドとして送信する。
    pub async fn upload_image<T>(
        &self,
        endpoint: &str,
        image: &ImageUpload,
        auth_token: Option<&str>,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!(
            "画像アップロード送信: endpoint={endpoint}, filename={}, size={}",
            image.filename,
            image.bytes.len()
        );

        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.filename.clone())
            .mime_str(image.content_type())
            .map_err(|e| AppError::validation(format!("MIMEタイプ設定エラー: {e}")))?;
        let form = multipart::Form::new().part("image", part);

        let request = self.client.post(self.url(endpoint)).multipart(form);
        self.send(request, auth_token, "POST", endpoint).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url)
    }

    /// リクエストを一度だけ送信し、レスポンスを解析する
    async fn send<T>(
        &self,
        mut request: RequestBuilder,
        auth_token: Option<&str>,
        method: &str,
        endpoint: &str,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        // 認証トークンがある場合は追加
        if let Some(token) = auth_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|e| {
            warn!("APIサーバーへの接続に失敗しました: method={method}, endpoint={endpoint}, error={e}");
            AppError::Network(format!("APIサーバーへの接続に失敗しました: {e}"))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::Network(format!("レスポンス読み取り失敗: {e}"))
        })?;

        if !status.is_success() {
            // 4xx/5xxを区別せず、本文をそのままエラーメッセージとする
            warn!(
                "{method}リクエスト失敗: endpoint={endpoint}, status={}, body={body}",
                status.as_u16()
            );
            return Err(AppError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!("{method}レスポンス受信: endpoint={endpoint}, bytes={}", body.len());
        let result = serde_json::from_str(&body)?;

        info!("{method}リクエスト成功: endpoint={endpoint}");
        Ok(result)
    }
}
