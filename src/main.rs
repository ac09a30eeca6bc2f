// 環境変数の設定でログインし、カテゴリー別の集計を表示する
//
// 使い方: bill-tracker [領収書画像のパス]
// 画像を指定した場合はOCRで抽出した明細も表示する（保存はしない）。

use bill_tracker_lib::features::receipts::ReceiptSummary;
use bill_tracker_lib::features::{auth, categories, ocr, receipts};
use bill_tracker_lib::shared::ScreenState;
use bill_tracker_lib::{get_env_var, initialize, AppState};
use log::error;

#[tokio::main]
async fn main() {
    if let Err(message) = run().await {
        error!("実行に失敗しました: {message}");
        eprintln!("エラー: {message}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let state = initialize().map_err(String::from)?;

    let email = get_env_var!("BILL_TRACKER_EMAIL").map_err(|e| e.to_string())?;
    let password = get_env_var!("BILL_TRACKER_PASSWORD").map_err(|e| e.to_string())?;

    let session = auth::commands::login(&email, &password, &state).await?;
    println!("ログインしました: user_id={}", session.user_id);

    print_category_summaries(&state).await?;

    if let Some(image_path) = std::env::args().nth(1) {
        print_ocr_rows(&image_path, &state).await?;
    }

    auth::commands::logout(&state);
    Ok(())
}

async fn print_category_summaries(state: &AppState) -> Result<(), String> {
    let categories = categories::get_categories(state).await?;
    if categories.is_empty() {
        println!("カテゴリーがありません");
        return Ok(());
    }

    // 集計に失敗したカテゴリーはアラートを表示して次へ進む
    let mut screen: ScreenState<ReceiptSummary> = ScreenState::default();
    for category in &categories {
        let loaded = screen
            .load(
                "集計エラー",
                receipts::get_category_summary(&category.name, state),
            )
            .await;
        if !loaded {
            if let Some(alert) = screen.dismiss_alert() {
                println!("[{}] {}: {}", category.name, alert.title, alert.message);
            }
            continue;
        }

        let summary = screen.data();
        println!(
            "[{}] 収入 {} / 支出 {} / 差引 {}",
            category.name, summary.income, summary.expense, summary.net
        );
        if let Some(latest) = &summary.latest {
            println!(
                "    最新: {} {} {} ({})",
                latest.date, latest.item_name, latest.amount, latest.transaction_type
            );
        }
    }
    Ok(())
}

async fn print_ocr_rows(image_path: &str, state: &AppState) -> Result<(), String> {
    let buffer = ocr::extract_bills_from_file(image_path, state).await?;
    println!("OCR抽出結果: {}件", buffer.len());
    for (index, row) in buffer.rows().iter().enumerate() {
        println!(
            "    {}. {} {} {} {}",
            index + 1,
            row.item_name,
            row.amount,
            row.transaction_type,
            row.date
        );
    }
    Ok(())
}
