// 領収書機能モジュール

pub mod api_commands;
pub mod models;
pub mod repository;
pub mod summary;

// モデル
pub use models::{
    CreateReceiptDto, ManualBillForm, Receipt, TransactionType, UpdateReceiptDto,
};

// 集計
pub use summary::{filter_by_user, summarize, ReceiptSummary};

// APIコマンド（APIサーバー経由）
pub use api_commands::{
    create_manual_receipt, delete_receipt, get_bill_history, get_category_summary, get_receipt,
    get_receipts, update_receipt,
};
