//! Request types for public REST API endpoints.

use serde::Serialize;

use crate::types::{AssetPairInfo, OhlcInterval};

/// Request parameters for asset info.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetInfoRequest {
    /// Comma-separated list of assets to get info for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Asset class (default: "currency").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aclass: Option<String>,
}

/// Request parameters for asset pairs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetPairsRequest {
    /// Comma-separated list of pairs to get info for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    /// Info level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<AssetPairInfo>,
}

/// Request parameters for ticker information.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickerRequest {
    /// Comma-separated list of pairs; absent means all pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
}

/// Request parameters for OHLC data.
#[derive(Debug, Clone, Serialize)]
pub struct OhlcRequest {
    /// Asset pair.
    pub pair: String,
    /// Candle interval in minutes.
    pub interval: OhlcInterval,
    /// Return data since this timestamp (or last id of a previous call).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
}

impl OhlcRequest {
    /// Create a new OHLC request.
    pub fn new(pair: impl Into<String>, interval: OhlcInterval) -> Self {
        Self {
            pair: pair.into(),
            interval,
            since: None,
        }
    }
}

/// Request parameters for the order book.
#[derive(Debug, Clone, Serialize)]
pub struct OrderBookRequest {
    /// Asset pair.
    pub pair: String,
    /// Maximum number of price levels per side (1..=500).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Request parameters for recent trades.
#[derive(Debug, Clone, Serialize)]
pub struct RecentTradesRequest {
    /// Asset pair.
    pub pair: String,
    /// Return trades since this cursor (the `last` field of a previous call).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    /// Maximum number of trades (1..=1000).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Request parameters for recent spreads.
#[derive(Debug, Clone, Serialize)]
pub struct RecentSpreadsRequest {
    /// Asset pair.
    pub pair: String,
    /// Return spreads since this cursor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
}
