mod common;

use chrono::NaiveDate;
use common::{get_connector, init_tracing};
use tickweave::{Tickweave, Timespan};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let tw = Tickweave::builder().with_connector(get_connector()).build()?;

    let from = NaiveDate::from_ymd_opt(2024, 3, 4).ok_or("bad date")?;
    let to = NaiveDate::from_ymd_opt(2024, 3, 15).ok_or("bad date")?;

    println!("Fetching daily AAPL bars {from} .. {to} in 5-day windows...");
    let series = tw.fetch_range("AAPL", Timespan::Day, from, to).await?;

    println!("\n## {} bars (adjusted: {})", series.len(), series.is_adjusted());
    for bar in series.bars().iter().take(10) {
        println!(" - {}  O {}  H {}  L {}  C {}  V {}", bar.ts.date_naive(), bar.open, bar.high, bar.low, bar.close, bar.volume);
    }
    if series.len() > 10 {
        println!("... and more");
    }

    let frame = series.frame();
    println!("\nColumnar projection: {} rows", frame.len());
    Ok(())
}
