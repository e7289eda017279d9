mod common;

use common::{get_connector, init_tracing};
use tickweave::{Lookback, RefreshMode, Tickweave, Timespan};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let tw = Tickweave::new(get_connector());

    let mut fetcher = tw
        .incremental("MSFT", Timespan::Hour, Lookback::Days(10))
        .with_mode(RefreshMode::Tail);

    let first = fetcher.refresh(true).await?;
    println!("Initial lookback: {} bars", first.len());

    // A later refresh only asks for the segment since the previous anchor.
    let again = fetcher.refresh(true).await?;
    println!("After tail refresh: {} bars", again.len());
    if let Some(last) = again.last() {
        println!("Newest bar starts at {}", last.ts);
    }
    Ok(())
}
