/// ユーザー機能モジュール
pub mod api_commands;
pub mod models;
pub mod repository;

pub use api_commands::*;
pub use models::*;
