use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

pub mod nanoid;

/// 金額入力で許可しない文字（数字と小数点以外）
static NON_AMOUNT_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.]").unwrap());

/// 先頭の数値部分（符号・整数部・小数部）
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)").unwrap());

/// 金額のキー入力を整形する
///
/// 数字と小数点以外の文字を取り除く。小数点が複数あってもそのまま残す。
///
/// # 例
/// `"12a.3.4"` → `"12.3.4"`
pub fn filter_amount_input(raw: &str) -> String {
    NON_AMOUNT_CHARS.replace_all(raw, "").into_owned()
}

/// 文字列の先頭から数値として読める部分を金額に変換する
///
/// 後ろに続く余分な文字は無視する（`"12.3.4"` → `12.3`）。
/// 負の値は大きさとして扱う。
///
/// # 戻り値
/// 数値として読める部分がない場合はNone
pub fn parse_amount_lenient(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let matched = LEADING_NUMBER.find(trimmed)?.as_str();
    let mut normalized = matched.trim_start_matches('+').trim_end_matches('.').to_string();
    if normalized.starts_with('.') {
        normalized.insert(0, '0');
    } else if normalized.starts_with("-.") {
        normalized.insert(1, '0');
    }

    Decimal::from_str(&normalized).ok().map(|amount| amount.abs())
}

/// 金額入力を検証して変換する
///
/// # 引数
/// * `raw` - 入力された金額文字列
/// * `field_name` - フィールド名（エラーメッセージ用）
pub fn parse_amount_field(raw: &str, field_name: &str) -> AppResult<Decimal> {
    validate_required_field(raw, field_name)?;
    parse_amount_lenient(raw)
        .ok_or_else(|| AppError::validation(format!("{field_name}は数値で入力してください")))
}

/// 日付文字列を日時に変換する
///
/// RFC3339、`YYYY-MM-DDTHH:MM:SS`（ミリ秒可）、`YYYY-MM-DD` を受け付ける。
/// タイムゾーン付きの値はUTCに揃える。
///
/// # 戻り値
/// 解析できない場合はNone
pub fn parse_receipt_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// 必須フィールドのバリデーション
///
/// # 引数
/// * `text` - 検証対象の文字列
/// * `field_name` - フィールド名（エラーメッセージ用）
///
/// # 戻り値
/// 空でない場合はOk(())、空の場合はエラー
pub fn validate_required_field(text: &str, field_name: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::validation(format!("{field_name}は必須項目です")));
    }
    Ok(())
}

/// 文字列の最小長バリデーション
///
/// 前後の空白を除いた文字数で判定する。
pub fn validate_min_length(text: &str, min_length: usize, field_name: &str) -> AppResult<()> {
    let char_count = text.trim().chars().count();
    if char_count < min_length {
        return Err(AppError::validation(format!(
            "{field_name}は{min_length}文字以上で入力してください"
        )));
    }
    Ok(())
}
