/// 領収書の集計
///
/// ユーザーとカテゴリーで絞り込んだ領収書から収入・支出・差引と最新の領収書を求める。
/// 呼び出しごとに渡された一覧全体を走査し、結果はキャッシュしない。
use crate::features::receipts::models::{Receipt, TransactionType};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::parse_receipt_date;
use rust_decimal::Decimal;
use serde::Serialize;

/// カテゴリー別の集計結果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReceiptSummary {
    pub income: Decimal,
    pub expense: Decimal,
    /// 収入 - 支出
    pub net: Decimal,
    /// 日付が最も新しい領収書
    pub latest: Option<Receipt>,
}

/// ユーザーとカテゴリー名で領収書を集計する
///
/// カテゴリー名は大文字小文字を区別した完全一致で比較する。
/// 金額は常に絶対値で加算する。
///
/// 最新の領収書は日付の最大値で決まり、同じ日付の場合は先に現れたものを採用する。
/// 解析できない日付はどの日付よりも古いものとして扱う。
///
/// # 戻り値
/// 集計結果。合計が金額型の範囲を超えた場合はバリデーションエラー
pub fn summarize(
    receipts: &[Receipt],
    user_id: &str,
    category_name: &str,
) -> AppResult<ReceiptSummary> {
    let mut summary = ReceiptSummary::default();
    let mut latest_date = None;

    for receipt in receipts
        .iter()
        .filter(|r| r.user_id == user_id && r.category == category_name)
    {
        let amount = receipt.amount.abs();
        let total = match receipt.transaction_type {
            TransactionType::Income => &mut summary.income,
            TransactionType::Expense => &mut summary.expense,
        };
        *total = total.checked_add(amount).ok_or_else(|| {
            AppError::validation(format!(
                "金額の合計が扱える範囲を超えています: category={category_name}"
            ))
        })?;

        let date = parse_receipt_date(&receipt.date);
        if summary.latest.is_none() || date > latest_date {
            latest_date = date;
            summary.latest = Some(receipt.clone());
        }
    }

    summary.net = summary
        .income
        .checked_sub(summary.expense)
        .ok_or_else(|| AppError::validation("差引金額が扱える範囲を超えています"))?;
    Ok(summary)
}

/// 指定ユーザーの領収書のみを返す
///
/// カテゴリーでは絞り込まない。並び順は入力のまま。
pub fn filter_by_user(receipts: &[Receipt], user_id: &str) -> Vec<Receipt> {
    receipts
        .iter()
        .filter(|r| r.user_id == user_id)
        .cloned()
        .collect()
}
