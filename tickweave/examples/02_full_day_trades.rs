mod common;

use chrono::NaiveDate;
use common::{get_connector, init_tracing};
use tickweave::Tickweave;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let tw = Tickweave::new(get_connector());
    let day = NaiveDate::from_ymd_opt(2024, 3, 4).ok_or("bad date")?;

    println!("Walking the trades cursor for AAPL on {day}...");
    let trades = tw.trades_for_day("AAPL", day).await?;

    println!(
        "\n## {} trades ingested (result count {})",
        trades.len(),
        trades.result_count()
    );
    if let (Some(first), Some(last)) = (trades.trades().first(), trades.trades().last()) {
        println!(" first: ts={} price={} size={}", first.ts, first.price, first.size);
        println!(" last:  ts={} price={} size={}", last.ts, last.price, last.size);
    }
    Ok(())
}
