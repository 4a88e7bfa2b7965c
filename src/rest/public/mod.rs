//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use serde_json::Value;

use crate::error::KrakenError;
use crate::rest::RestClient;
use crate::rest::endpoints::public;

#[derive(serde::Serialize)]
struct Empty {}

impl RestClient {
    /// Get the server time.
    ///
    /// This is useful for synchronizing local time and checking API availability.
    pub async fn server_time(&self) -> Result<Value, KrakenError> {
        self.public_get(public::TIME, &Empty {}).await
    }

    /// Get the system status (online, maintenance, cancel_only, post_only).
    pub async fn system_status(&self) -> Result<Value, KrakenError> {
        self.public_get(public::SYSTEM_STATUS, &Empty {}).await
    }

    /// Get asset information.
    pub async fn assets(&self, request: &AssetInfoRequest) -> Result<Value, KrakenError> {
        self.public_get(public::ASSETS, request).await
    }

    /// Get tradable asset pairs.
    pub async fn asset_pairs(&self, request: &AssetPairsRequest) -> Result<Value, KrakenError> {
        self.public_get(public::ASSET_PAIRS, request).await
    }

    /// Get level-1 ticker information for one, several or all pairs.
    pub async fn ticker(&self, request: &TickerRequest) -> Result<Value, KrakenError> {
        self.public_get(public::TICKER, request).await
    }

    /// Get OHLC (candlestick) data.
    ///
    /// Returns up to 720 OHLC data points for the specified pair and interval.
    pub async fn ohlc(&self, request: &OhlcRequest) -> Result<Value, KrakenError> {
        self.public_get(public::OHLC, request).await
    }

    /// Get the aggregated order book for a pair.
    pub async fn order_book(&self, request: &OrderBookRequest) -> Result<Value, KrakenError> {
        self.public_get(public::DEPTH, request).await
    }

    /// Get recent trades for a pair.
    pub async fn recent_trades(&self, request: &RecentTradesRequest) -> Result<Value, KrakenError> {
        self.public_get(public::TRADES, request).await
    }

    /// Get recent spreads for a pair.
    pub async fn recent_spreads(
        &self,
        request: &RecentSpreadsRequest,
    ) -> Result<Value, KrakenError> {
        self.public_get(public::SPREAD, request).await
    }
}
