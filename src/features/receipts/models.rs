use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{parse_amount_field, validate_required_field};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 取引種別
///
/// APIサーバーとはタイ語のラベルでやり取りする。英語名も入力として受け付ける。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransactionType {
    /// 収入
    #[default]
    #[serde(rename = "รายรับ", alias = "Income", alias = "income")]
    Income,
    /// 支出
    #[serde(rename = "รายจ่าย", alias = "Expense", alias = "expense")]
    Expense,
}

impl TransactionType {
    /// APIサーバーで使用するラベル
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "รายรับ",
            TransactionType::Expense => "รายจ่าย",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "รายรับ" | "Income" | "income" => Ok(TransactionType::Income),
            "รายจ่าย" | "Expense" | "expense" => Ok(TransactionType::Expense),
            other => Err(AppError::validation(format!("不明な取引種別です: {other}"))),
        }
    }
}

/// 領収書データモデル
///
/// `amount` は常に大きさとして扱い、符号は `transaction_type` から決まる。
/// `category` はカテゴリー名をそのまま保持する（IDによる参照ではない）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub category: String,
}

/// 領収書作成用DTO
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceiptDto {
    pub item_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: String,
    pub user_id: String,
    pub category: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// 領収書更新用DTO
///
/// 指定したフィールドのみ送信する。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReceiptDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
}

impl From<CreateReceiptDto> for UpdateReceiptDto {
    fn from(dto: CreateReceiptDto) -> Self {
        Self {
            item_name: Some(dto.item_name),
            amount: Some(dto.amount),
            date: Some(dto.date),
            user_id: Some(dto.user_id),
            category: Some(dto.category),
            transaction_type: Some(dto.transaction_type),
        }
    }
}

/// 手入力の明細フォーム
#[derive(Debug, Clone, Default)]
pub struct ManualBillForm {
    pub item_name: String,
    /// 入力途中の金額文字列
    pub amount: String,
    pub date: String,
    pub transaction_type: TransactionType,
}

impl ManualBillForm {
    /// 入力値を検証して作成用DTOに変換する
    ///
    /// # 引数
    /// * `user_id` - ログインユーザーのID
    /// * `category` - 登録先カテゴリー名
    pub fn to_dto(&self, user_id: &str, category: &str) -> AppResult<CreateReceiptDto> {
        validate_required_field(&self.item_name, "品名")?;
        let amount = parse_amount_field(&self.amount, "金額")?;
        validate_required_field(&self.date, "日付")?;

        Ok(CreateReceiptDto {
            item_name: self.item_name.trim().to_string(),
            amount,
            date: self.date.trim().to_string(),
            user_id: user_id.to_string(),
            category: category.to_string(),
            transaction_type: self.transaction_type,
        })
    }
}
