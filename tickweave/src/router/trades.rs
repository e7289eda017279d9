use chrono::NaiveDate;
use tickweave_core::{TickweaveError, TradeSeries, TradesRequest};

use crate::Tickweave;

fn is_full(len: usize, page_size: u32) -> bool {
    u32::try_from(len).is_ok_and(|n| n == page_size)
}

impl Tickweave {
    /// Every trade of `symbol` on `date`, walking the cursor to the end of
    /// the day.
    ///
    /// # Errors
    /// See [`Tickweave::fetch_full_day`].
    pub async fn trades_for_day(
        &self,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<TradeSeries, TickweaveError> {
        self.fetch_full_day(TradesRequest::new(symbol, date, u32::MAX))
            .await
    }

    /// Fetch trades for one symbol-day, following the cursor when `limit`
    /// exceeds the page ceiling.
    ///
    /// Behavior:
    /// - Each page asks for `min(limit, trade_page_ceiling)` trades.
    /// - A follow-up page is requested only while the previous page was full,
    ///   returned a cursor, and the ceiling actually reduced the request.
    /// - Each follow-up starts at the last timestamp of the previous page.
    ///   The service repeats that boundary trade, and it is dropped on merge.
    /// - An empty follow-up page ends the walk without being merged.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a zero `limit` or when `reverse` is combined
    /// with a `limit` above the ceiling. Returns `ContinuationMismatch` if a
    /// follow-up page does not start at the previous boundary. Connector
    /// errors abort the walk and the pages fetched so far are discarded.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tickweave::router::trades::fetch_full_day",
            skip(self, req),
            fields(symbol = %req.symbol, date = %req.date, limit = req.limit, reverse = req.reverse),
            err,
        )
    )]
    pub async fn fetch_full_day(&self, req: TradesRequest) -> Result<TradeSeries, TickweaveError> {
        let ceiling = self.cfg.trade_page_ceiling;
        if req.limit == 0 {
            return Err(TickweaveError::InvalidArg("trade limit must be positive".into()));
        }
        if req.reverse && req.limit > ceiling {
            return Err(TickweaveError::InvalidArg(format!(
                "reverse pagination cannot exceed the page ceiling of {ceiling} (limit {})",
                req.limit
            )));
        }
        let provider = self.trades_provider()?;

        let page_size = req.limit.min(ceiling);
        let mut page_req = TradesRequest {
            limit: page_size,
            ..req.clone()
        };
        let (mut acc, mut cursor) = provider.trades(page_req.clone()).await?;
        let mut full = is_full(acc.len(), page_size);
        #[cfg(feature = "tracing")]
        tracing::debug!(page = 0, trades = acc.len(), "first trades page");

        #[cfg(feature = "tracing")]
        let mut page_no = 0_u32;
        while let Some(from) = cursor
            && full
            && page_size < req.limit
        {
            page_req.timestamp_min = Some(from);
            let (page, next) = provider.trades(page_req.clone()).await?;
            #[cfg(feature = "tracing")]
            {
                page_no += 1;
                tracing::debug!(page = page_no, trades = page.len(), cursor = from, "continuation page");
            }
            if page.is_empty() {
                break;
            }
            full = is_full(page.len(), page_size);
            acc.consume(page)?;
            if next == Some(from) {
                // A page made only of trades at the cursor cannot advance it.
                break;
            }
            cursor = next;
        }

        #[cfg(feature = "tracing")]
        tracing::info!(trades = acc.len(), result_count = acc.result_count(), "trades day assembled");
        Ok(acc)
    }
}
