//! REST paths used by the tools.
//!
//! Paths double as the signed `url_path` of private requests, so they carry
//! the `/0/` version prefix and no trailing slash.

/// Production REST host.
pub const KRAKEN_BASE_URL: &str = "https://api.kraken.com";

/// Unsigned GET endpoints.
pub mod public {
    pub const TIME: &str = "/0/public/Time";
    pub const SYSTEM_STATUS: &str = "/0/public/SystemStatus";
    pub const ASSETS: &str = "/0/public/Assets";
    pub const ASSET_PAIRS: &str = "/0/public/AssetPairs";
    pub const TICKER: &str = "/0/public/Ticker";
    pub const OHLC: &str = "/0/public/OHLC";
    /// Order book (`order_book` tool).
    pub const DEPTH: &str = "/0/public/Depth";
    pub const TRADES: &str = "/0/public/Trades";
    pub const SPREAD: &str = "/0/public/Spread";
}

/// Signed POST endpoints.
pub mod private {
    pub const BALANCE: &str = "/0/private/Balance";
    pub const OPEN_ORDERS: &str = "/0/private/OpenOrders";
    pub const CLOSED_ORDERS: &str = "/0/private/ClosedOrders";
    pub const TRADES_HISTORY: &str = "/0/private/TradesHistory";
    pub const ADD_ORDER: &str = "/0/private/AddOrder";
    pub const AMEND_ORDER: &str = "/0/private/AmendOrder";
    pub const CANCEL_ORDER: &str = "/0/private/CancelOrder";
    /// Dead man's switch.
    pub const CANCEL_ALL_ORDERS_AFTER: &str = "/0/private/CancelAllOrdersAfter";
}
