use crate::features::receipts::models::{CreateReceiptDto, TransactionType};
use crate::shared::errors::AppError;
use crate::shared::utils::nanoid::is_valid_nanoid;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// OCRサービスが抽出した明細
///
/// 項目の有無や型が一定しないため、すべて任意項目として受け取る。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    /// サーバー側で保存済みの場合のID
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub item_name: Option<String>,
    /// 数値または文字列
    #[serde(default)]
    pub amount: Value,
    #[serde(rename = "type", default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl RawLineItem {
    /// 金額を編集用の文字列に変換する
    pub fn amount_text(&self) -> String {
        match &self.amount {
            Value::Number(number) => number.to_string(),
            Value::String(text) => text.clone(),
            _ => String::new(),
        }
    }
}

/// OCRサービスのレスポンス
///
/// 抽出結果は `saved` に入る。
#[derive(Debug, Default, Deserialize)]
pub struct OcrResponse {
    #[serde(default)]
    pub saved: Option<Vec<RawLineItem>>,
}

impl OcrResponse {
    pub fn into_line_items(self) -> Vec<RawLineItem> {
        self.saved.unwrap_or_default()
    }
}

/// 下書き行の識別子
///
/// 取り込み時に割り当て、行の削除や並び替えの後も変わらない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftRowId(String);

impl DraftRowId {
    pub(crate) fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 画面から受け取った行IDを検証して変換する
impl FromStr for DraftRowId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid_nanoid(s) {
            return Err(AppError::validation(format!("行IDの形式が不正です: {s}")));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for DraftRowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 編集中の明細（未保存の領収書候補）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftRow {
    pub id: DraftRowId,
    /// サーバー側で保存済みの場合のID
    pub receipt_id: Option<String>,
    pub item_name: String,
    /// 入力途中の値を保持するため文字列で持つ
    pub amount: String,
    pub transaction_type: TransactionType,
    pub date: String,
}

/// 編集対象のフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    ItemName,
    Amount,
    Type,
    Date,
}

impl FromStr for DraftField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "itemName" => Ok(DraftField::ItemName),
            "amount" => Ok(DraftField::Amount),
            "type" => Ok(DraftField::Type),
            "date" => Ok(DraftField::Date),
            other => Err(AppError::validation(format!(
                "編集できないフィールドです: {other}"
            ))),
        }
    }
}

/// 保存待ちの明細
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReceipt {
    pub row_id: DraftRowId,
    /// ある場合は更新、ない場合は新規作成
    pub receipt_id: Option<String>,
    pub dto: CreateReceiptDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocr_response_saved() {
        let response: OcrResponse = serde_json::from_str(
            r#"{"saved":[{"_id":"r1","itemName":"Coffee","amount":50,"type":"รายจ่าย","date":"2024-01-01T00:00:00.000Z"},{"itemName":"Tea","amount":"35.50"}]}"#,
        )
        .unwrap();
        let items = response.into_line_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_deref(), Some("r1"));
        assert_eq!(items[0].amount_text(), "50");
        assert_eq!(items[1].amount_text(), "35.50");
        assert_eq!(items[1].transaction_type, None);
    }

    #[test]
    fn test_ocr_response_without_saved_is_empty() {
        let bills_only: OcrResponse =
            serde_json::from_str(r#"{"bills":[{"itemName":"Coffee"}]}"#).unwrap();
        assert!(bills_only.into_line_items().is_empty());

        let null_saved: OcrResponse = serde_json::from_str(r#"{"saved":null}"#).unwrap();
        assert!(null_saved.into_line_items().is_empty());
    }

    #[test]
    fn test_draft_field_from_str() {
        assert_eq!("amount".parse::<DraftField>().unwrap(), DraftField::Amount);
        assert_eq!("itemName".parse::<DraftField>().unwrap(), DraftField::ItemName);
        assert!("userId".parse::<DraftField>().is_err());
    }

    #[test]
    fn test_draft_row_id_from_str() {
        let id = crate::shared::utils::nanoid::generate_draft_id();
        assert_eq!(id.parse::<DraftRowId>().unwrap().as_str(), id);

        assert!(matches!(
            "missing".parse::<DraftRowId>(),
            Err(AppError::Validation(_))
        ));
        assert!("123456789012345678@01".parse::<DraftRowId>().is_err());
    }
}
