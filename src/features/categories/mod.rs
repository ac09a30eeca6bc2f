/// カテゴリー機能モジュール
///
/// カテゴリーに関連するモデル、APIサーバーとの通信、コマンドを提供します。
pub mod api_commands;
pub mod models;
pub mod repository;

pub use api_commands::*;
pub use models::*;
