/// OCR明細の編集バッファ
///
/// OCRで抽出した明細を保存前に確認・修正するための作業領域。
/// 行は取り込み時に割り当てた `DraftRowId` で指定する。取り消し操作はない。
///
/// 状態遷移: `Empty → Populated → Editing* → Committed | Abandoned`
use crate::features::ocr::models::{DraftField, DraftRow, DraftRowId, PendingReceipt, RawLineItem};
use crate::features::receipts::models::{CreateReceiptDto, TransactionType};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::nanoid::generate_draft_id;
use crate::shared::utils::{filter_amount_input, parse_amount_field, validate_required_field};
use log::{debug, info};

/// バッファの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// 取り込み前、または抽出結果が0件
    Empty,
    /// 取り込み直後
    Populated,
    /// 1回以上編集・削除した
    Editing,
    /// すべての行を保存した
    Committed,
    /// 保存せずに破棄した
    Abandoned,
}

impl BufferState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BufferState::Committed | BufferState::Abandoned)
    }
}

#[derive(Debug, Clone)]
pub struct ReconciliationBuffer {
    rows: Vec<DraftRow>,
    state: BufferState,
}

impl Default for ReconciliationBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationBuffer {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            state: BufferState::Empty,
        }
    }

    /// OCRの抽出結果から行を作成する
    ///
    /// 抽出結果1件につき1行を作成し、既存の行は置き換える。
    /// 抽出結果が0件の場合はエラーにせず空のバッファになる。
    pub fn populate(&mut self, items: Vec<RawLineItem>) -> AppResult<()> {
        self.ensure_open("取り込み")?;

        self.rows = items.into_iter().map(draft_from_raw).collect();
        self.state = if self.rows.is_empty() {
            BufferState::Empty
        } else {
            BufferState::Populated
        };

        info!("OCR明細を取り込みました: count={}", self.rows.len());
        Ok(())
    }

    /// 行のフィールドを書き換える
    ///
    /// 金額は数字と小数点以外の文字を取り除いて保存する。
    /// 小数点が複数あってもここでは検証しない。
    pub fn edit_field(&mut self, id: &DraftRowId, field: DraftField, value: &str) -> AppResult<()> {
        self.ensure_open("編集")?;

        let row = self
            .rows
            .iter_mut()
            .find(|row| &row.id == id)
            .ok_or_else(|| AppError::not_found(format!("明細行（{id}）")))?;

        match field {
            DraftField::ItemName => row.item_name = value.to_string(),
            DraftField::Amount => row.amount = filter_amount_input(value),
            DraftField::Type => row.transaction_type = value.parse()?,
            DraftField::Date => row.date = value.to_string(),
        }

        debug!("明細行を編集しました: id={id}, field={field:?}");
        self.state = BufferState::Editing;
        Ok(())
    }

    /// 取引種別を切り替える
    pub fn set_type(&mut self, id: &DraftRowId, transaction_type: TransactionType) -> AppResult<()> {
        self.edit_field(id, DraftField::Type, transaction_type.label())
    }

    /// 行を削除する
    ///
    /// 後続の行の識別子は変わらない。
    pub fn delete_row(&mut self, id: &DraftRowId) -> AppResult<DraftRow> {
        self.ensure_open("削除")?;

        let position = self
            .rows
            .iter()
            .position(|row| &row.id == id)
            .ok_or_else(|| AppError::not_found(format!("明細行（{id}）")))?;

        let removed = self.rows.remove(position);
        debug!("明細行を削除しました: id={id}, remaining={}", self.rows.len());
        self.state = BufferState::Editing;
        Ok(removed)
    }

    /// 保存用のデータを作成する
    ///
    /// すべての行を検証し、1行でも不正があれば何も返さない。
    /// 金額は先頭の数値部分だけを読み取る（`"12.3.4"` → `12.3`）。
    ///
    /// # 引数
    /// * `user_id` - ログインユーザーのID
    /// * `category` - 登録先カテゴリー名
    pub fn prepare_commit(&self, user_id: &str, category: &str) -> AppResult<Vec<PendingReceipt>> {
        self.ensure_open("保存")?;

        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let line = index + 1;
                validate_required_field(&row.item_name, &format!("{line}行目の品名"))?;
                let amount = parse_amount_field(&row.amount, &format!("{line}行目の金額"))?;

                Ok(PendingReceipt {
                    row_id: row.id.clone(),
                    receipt_id: row.receipt_id.clone(),
                    dto: CreateReceiptDto {
                        item_name: row.item_name.trim().to_string(),
                        amount,
                        date: row.date.trim().to_string(),
                        user_id: user_id.to_string(),
                        category: category.to_string(),
                        transaction_type: row.transaction_type,
                    },
                })
            })
            .collect()
    }

    /// 保存が完了した行をバッファから取り除く
    pub fn mark_persisted(&mut self, id: &DraftRowId) -> AppResult<()> {
        self.ensure_open("保存")?;

        let before = self.rows.len();
        self.rows.retain(|row| &row.id != id);
        if self.rows.len() == before {
            return Err(AppError::not_found(format!("明細行（{id}）")));
        }
        Ok(())
    }

    /// すべての行の保存後にバッファを確定する
    pub fn complete_commit(&mut self) -> AppResult<()> {
        self.ensure_open("保存")?;

        if !self.rows.is_empty() {
            return Err(AppError::invalid_state(format!(
                "未保存の明細が{}件残っています",
                self.rows.len()
            )));
        }

        self.state = BufferState::Committed;
        info!("OCR明細の保存が完了しました");
        Ok(())
    }

    /// 保存せずに破棄する
    pub fn abandon(&mut self) -> AppResult<()> {
        self.ensure_open("破棄")?;

        let discarded = self.rows.len();
        self.rows.clear();
        self.state = BufferState::Abandoned;
        info!("OCR明細を破棄しました: discarded={discarded}");
        Ok(())
    }

    pub fn rows(&self) -> &[DraftRow] {
        &self.rows
    }

    pub fn row(&self, id: &DraftRowId) -> Option<&DraftRow> {
        self.rows.iter().find(|row| &row.id == id)
    }

    /// 表示順での行の識別子
    pub fn row_ids(&self) -> Vec<DraftRowId> {
        self.rows.iter().map(|row| row.id.clone()).collect()
    }

    pub fn state(&self) -> BufferState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn ensure_open(&self, operation: &str) -> AppResult<()> {
        if self.state.is_terminal() {
            return Err(AppError::invalid_state(format!(
                "確定済みのため{operation}できません: state={:?}",
                self.state
            )));
        }
        Ok(())
    }
}

fn draft_from_raw(item: RawLineItem) -> DraftRow {
    let transaction_type = item
        .transaction_type
        .as_deref()
        .and_then(|label| label.parse().ok())
        .unwrap_or_default();

    DraftRow {
        id: DraftRowId::new(generate_draft_id()),
        amount: item.amount_text(),
        receipt_id: item.id,
        item_name: item.item_name.unwrap_or_default(),
        transaction_type,
        date: item.date.unwrap_or_default(),
    }
}
