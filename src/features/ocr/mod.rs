// OCR明細機能モジュール

pub mod api_commands;
pub mod buffer;
pub mod models;
pub mod service;

pub use api_commands::{commit_bills, extract_bills, extract_bills_from_file};
pub use buffer::{BufferState, ReconciliationBuffer};
pub use models::{DraftField, DraftRow, DraftRowId, OcrResponse, PendingReceipt, RawLineItem};
