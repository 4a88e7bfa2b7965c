//! Common domain types for Kraken API.
//!
//! Each enum parses from the exact wire spelling (`FromStr`) so that loosely
//! typed tool arguments can be checked before they reach the exchange.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuySell {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl BuySell {
    /// Accepted wire values.
    pub const VALUES: &'static [&'static str] = &["buy", "sell"];
}

impl std::fmt::Display for BuySell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuySell::Buy => write!(f, "buy"),
            BuySell::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for BuySell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(BuySell::Buy),
            "sell" => Ok(BuySell::Sell),
            _ => Err(format!("Invalid side: {s}")),
        }
    }
}

/// Order type for trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Market order - execute immediately at best available price
    Market,
    /// Limit order - execute at specified price or better
    Limit,
    /// Stop-loss order - trigger market order when price reaches stop price
    StopLoss,
    /// Take-profit order - trigger market order when price reaches profit target
    TakeProfit,
    /// Stop-loss limit - trigger limit order when price reaches stop price
    StopLossLimit,
    /// Take-profit limit - trigger limit order when price reaches profit target
    TakeProfitLimit,
    /// Trailing stop order
    TrailingStop,
    /// Trailing stop limit order
    TrailingStopLimit,
}

impl OrderType {
    /// Accepted wire values.
    pub const VALUES: &'static [&'static str] = &[
        "market",
        "limit",
        "stop-loss",
        "take-profit",
        "stop-loss-limit",
        "take-profit-limit",
        "trailing-stop",
        "trailing-stop-limit",
    ];

    /// Whether the order needs `price` (limit or trigger price).
    pub fn requires_price(&self) -> bool {
        !matches!(self, OrderType::Market)
    }

    /// Whether the order needs `price2` (the limit price of a triggered order).
    pub fn requires_secondary_price(&self) -> bool {
        matches!(
            self,
            OrderType::StopLossLimit | OrderType::TakeProfitLimit | OrderType::TrailingStopLimit
        )
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::StopLoss => "stop-loss",
            OrderType::TakeProfit => "take-profit",
            OrderType::StopLossLimit => "stop-loss-limit",
            OrderType::TakeProfitLimit => "take-profit-limit",
            OrderType::TrailingStop => "trailing-stop",
            OrderType::TrailingStopLimit => "trailing-stop-limit",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "market" => Ok(OrderType::Market),
            "limit" => Ok(OrderType::Limit),
            "stop-loss" => Ok(OrderType::StopLoss),
            "take-profit" => Ok(OrderType::TakeProfit),
            "stop-loss-limit" => Ok(OrderType::StopLossLimit),
            "take-profit-limit" => Ok(OrderType::TakeProfitLimit),
            "trailing-stop" => Ok(OrderType::TrailingStop),
            "trailing-stop-limit" => Ok(OrderType::TrailingStopLimit),
            _ => Err(format!("Invalid order type: {s}")),
        }
    }
}

/// Time in force for orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till canceled (default)
    #[default]
    GTC,
    /// Immediate or cancel - fill what's possible immediately, cancel rest
    IOC,
    /// Good till date - order expires at specified time
    GTD,
}

impl TimeInForce {
    /// Accepted wire values.
    pub const VALUES: &'static [&'static str] = &["GTC", "IOC", "GTD"];
}

impl FromStr for TimeInForce {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GTC" => Ok(TimeInForce::GTC),
            "IOC" => Ok(TimeInForce::IOC),
            "GTD" => Ok(TimeInForce::GTD),
            _ => Err(format!("Invalid time in force: {s}")),
        }
    }
}

/// Which timestamp a closed-orders query filters on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseTime {
    /// Order open time
    Open,
    /// Order close time
    Close,
    /// Either
    #[default]
    Both,
}

impl CloseTime {
    /// Accepted wire values.
    pub const VALUES: &'static [&'static str] = &["open", "close", "both"];
}

impl FromStr for CloseTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(CloseTime::Open),
            "close" => Ok(CloseTime::Close),
            "both" => Ok(CloseTime::Both),
            _ => Err(format!("Invalid closetime: {s}")),
        }
    }
}

/// Trade filter for the trades history query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeFilter {
    /// All trades
    #[default]
    #[serde(rename = "all")]
    All,
    /// Any position (open or closed)
    #[serde(rename = "any position")]
    AnyPosition,
    /// Positions that have been closed
    #[serde(rename = "closed position")]
    ClosedPosition,
    /// Any trade closing all or part of a position
    #[serde(rename = "closing position")]
    ClosingPosition,
    /// Non-positional trades
    #[serde(rename = "no position")]
    NoPosition,
}

impl TradeFilter {
    /// Accepted wire values.
    pub const VALUES: &'static [&'static str] = &[
        "all",
        "any position",
        "closed position",
        "closing position",
        "no position",
    ];
}

impl FromStr for TradeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TradeFilter::All),
            "any position" => Ok(TradeFilter::AnyPosition),
            "closed position" => Ok(TradeFilter::ClosedPosition),
            "closing position" => Ok(TradeFilter::ClosingPosition),
            "no position" => Ok(TradeFilter::NoPosition),
            _ => Err(format!("Invalid trade type: {s}")),
        }
    }
}

/// Detail level for the asset pairs query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetPairInfo {
    /// All info
    #[default]
    Info,
    /// Leverage info
    Leverage,
    /// Fee schedule
    Fees,
    /// Margin info
    Margin,
}

impl AssetPairInfo {
    /// Accepted wire values.
    pub const VALUES: &'static [&'static str] = &["info", "leverage", "fees", "margin"];
}

impl FromStr for AssetPairInfo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(AssetPairInfo::Info),
            "leverage" => Ok(AssetPairInfo::Leverage),
            "fees" => Ok(AssetPairInfo::Fees),
            "margin" => Ok(AssetPairInfo::Margin),
            _ => Err(format!("Invalid info level: {s}")),
        }
    }
}

/// OHLC interval in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum OhlcInterval {
    /// 1 minute
    #[default]
    Min1,
    /// 5 minutes
    Min5,
    /// 15 minutes
    Min15,
    /// 30 minutes
    Min30,
    /// 1 hour
    Hour1,
    /// 4 hours
    Hour4,
    /// 1 day
    Day1,
    /// 1 week
    Week1,
    /// 15 days
    Day15,
}

impl OhlcInterval {
    /// Accepted values in minutes.
    pub const MINUTES: &'static [u32] = &[1, 5, 15, 30, 60, 240, 1440, 10080, 21600];
}

impl From<OhlcInterval> for u32 {
    fn from(interval: OhlcInterval) -> u32 {
        match interval {
            OhlcInterval::Min1 => 1,
            OhlcInterval::Min5 => 5,
            OhlcInterval::Min15 => 15,
            OhlcInterval::Min30 => 30,
            OhlcInterval::Hour1 => 60,
            OhlcInterval::Hour4 => 240,
            OhlcInterval::Day1 => 1440,
            OhlcInterval::Week1 => 10080,
            OhlcInterval::Day15 => 21600,
        }
    }
}

impl TryFrom<u32> for OhlcInterval {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(OhlcInterval::Min1),
            5 => Ok(OhlcInterval::Min5),
            15 => Ok(OhlcInterval::Min15),
            30 => Ok(OhlcInterval::Min30),
            60 => Ok(OhlcInterval::Hour1),
            240 => Ok(OhlcInterval::Hour4),
            1440 => Ok(OhlcInterval::Day1),
            10080 => Ok(OhlcInterval::Week1),
            21600 => Ok(OhlcInterval::Day15),
            _ => Err(format!("Invalid OHLC interval: {}", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_sell_parse() {
        assert_eq!("buy".parse::<BuySell>().unwrap(), BuySell::Buy);
        assert!("BUY".parse::<BuySell>().is_err());
        assert!("hold".parse::<BuySell>().is_err());
    }

    #[test]
    fn test_order_type_values_round_trip() {
        for value in OrderType::VALUES {
            let parsed: OrderType = value.parse().unwrap();
            assert_eq!(parsed.to_string(), *value);
            assert_eq!(
                serde_json::to_value(parsed).unwrap(),
                serde_json::json!(value)
            );
        }
        assert!("settle-position".parse::<OrderType>().is_err());
    }

    #[test]
    fn test_order_type_price_requirements() {
        assert!(!OrderType::Market.requires_price());
        assert!(OrderType::Limit.requires_price());
        assert!(!OrderType::StopLoss.requires_secondary_price());
        assert!(OrderType::StopLossLimit.requires_secondary_price());
    }

    #[test]
    fn test_trade_filter_wire_names() {
        for value in TradeFilter::VALUES {
            let parsed: TradeFilter = value.parse().unwrap();
            assert_eq!(
                serde_json::to_value(parsed).unwrap(),
                serde_json::json!(value)
            );
        }
    }

    #[test]
    fn test_ohlc_interval_conversion() {
        assert_eq!(u32::from(OhlcInterval::Hour1), 60);
        assert_eq!(OhlcInterval::try_from(1440).unwrap(), OhlcInterval::Day1);
        assert!(OhlcInterval::try_from(999).is_err());
        for minutes in OhlcInterval::MINUTES {
            assert_eq!(u32::from(OhlcInterval::try_from(*minutes).unwrap()), *minutes);
        }
    }
}
