use tracing::{debug, info, warn};

use crate::config::{ScanConfig, Timeframe};
use crate::models::candle::{Candle, TickerQuote};
use crate::models::snapshot::BreakoutCandidate;
use crate::scanner::{analyzer, ranker};

/// External collaborator producing candle history for a symbol, ordered
/// oldest→newest. Transport, retries and pacing live behind this seam.
pub trait CandleSource {
    fn candles(&self, symbol: &str, timeframe: Timeframe) -> anyhow::Result<Vec<Candle>>;
}

/// External collaborator producing last price and 24h volume for a symbol.
pub trait TickerSource {
    fn ticker(&self, symbol: &str) -> anyhow::Result<TickerQuote>;
}

/// Sweeps a symbol list through the analysis engine.
///
/// Symbols fail independently: a source error or an empty analysis skips
/// that symbol and the sweep continues. The engine itself is stateless, so
/// callers needing parallelism can analyze symbols concurrently and rank
/// the union; this sweep keeps the simple sequential shape.
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Analyze every symbol and return the ranked, truncated shortlist.
    pub fn scan<C, T>(&self, symbols: &[String], candles: &C, tickers: &T) -> Vec<BreakoutCandidate>
    where
        C: CandleSource,
        T: TickerSource,
    {
        let profile = self.config.profile();
        let mut admitted = Vec::new();

        for symbol in symbols {
            let history = match candles.candles(symbol, self.config.timeframe) {
                Ok(history) => history,
                Err(e) => {
                    warn!(symbol, "candle source failed, skipping: {e:#}");
                    continue;
                }
            };
            let quote = match tickers.ticker(symbol) {
                Ok(quote) => quote,
                Err(e) => {
                    warn!(symbol, "ticker source failed, skipping: {e:#}");
                    continue;
                }
            };

            if let Some(candidate) = analyzer::analyze(
                symbol,
                &history,
                quote.last_price,
                quote.volume_24h,
                &profile,
            ) {
                debug!(
                    symbol,
                    status = ?candidate.status,
                    potential = candidate.potential,
                    "admitted"
                );
                admitted.push(candidate);
            }
        }

        info!(
            scanned = symbols.len(),
            admitted = admitted.len(),
            timeframe = self.config.timeframe.as_str(),
            "scan complete"
        );
        ranker::rank_top(admitted, self.config.max_results)
    }
}
