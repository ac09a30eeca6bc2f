/// 機能別モジュール
///
/// 各機能モジュールは、その機能に関連するモデル、APIサーバーとの通信、コマンドを含む。
pub mod analytics;
pub mod auth;
pub mod categories;
pub mod ocr;
pub mod receipts;
pub mod users;
