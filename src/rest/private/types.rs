//! Request types for private REST API endpoints.
//!
//! Field order is wire order: bodies are URL-encoded in declaration order
//! after the nonce.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{BuySell, CloseTime, OrderType, TimeInForce, TradeFilter};

/// Request to add an order.
#[derive(Debug, Clone, Serialize)]
pub struct AddOrderRequest {
    /// Asset pair.
    pub pair: String,
    /// Order side (buy/sell).
    #[serde(rename = "type")]
    pub side: BuySell,
    /// Order type.
    pub ordertype: OrderType,
    /// Order volume in base currency.
    pub volume: Decimal,
    /// Price (limit price for limit orders, trigger price for stop orders).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Secondary price (limit price for stop-limit orders).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price2: Option<String>,
    /// Time in force.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeinforce: Option<TimeInForce>,
    /// User reference ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i32>,
    /// Client order ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cl_ord_id: Option<String>,
    /// Validate only; the exchange checks the order but never places it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,
}

impl AddOrderRequest {
    /// Create a new order request.
    pub fn new(
        pair: impl Into<String>,
        side: BuySell,
        ordertype: OrderType,
        volume: Decimal,
    ) -> Self {
        Self {
            pair: pair.into(),
            side,
            ordertype,
            volume,
            price: None,
            price2: None,
            timeinforce: None,
            userref: None,
            cl_ord_id: None,
            validate: None,
        }
    }

    /// Set the price.
    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Set validate-only mode.
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate.then_some(true);
        self
    }

    /// Whether this request can only be validated, never executed.
    pub fn is_validate_only(&self) -> bool {
        self.validate == Some(true)
    }
}

/// Request to cancel one order.
#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderRequest {
    /// Transaction ID, client order ID or user reference ID.
    pub txid: String,
}

impl CancelOrderRequest {
    /// Create a new cancel order request.
    pub fn new(txid: impl Into<String>) -> Self {
        Self { txid: txid.into() }
    }
}

/// Request to amend an order in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AmendOrderRequest {
    /// Kraken order identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    /// Client order identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cl_ord_id: Option<String>,
    /// New order quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_qty: Option<Decimal>,
    /// New visible quantity for iceberg orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_qty: Option<Decimal>,
    /// New limit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<String>,
    /// New trigger price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<String>,
    /// Reject the amend if the new price would take liquidity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,
}

impl AmendOrderRequest {
    /// Whether at least one amendable field is set.
    pub fn has_changes(&self) -> bool {
        self.order_qty.is_some()
            || self.display_qty.is_some()
            || self.limit_price.is_some()
            || self.trigger_price.is_some()
    }
}

/// Request for open orders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenOrdersRequest {
    /// Include trades in output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
    /// Restrict to given user reference ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i32>,
    /// Restrict to given client order ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cl_ord_id: Option<String>,
}

/// Request to arm or disarm the dead man's switch.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CancelAllOrdersAfterRequest {
    /// Countdown in seconds; 0 disables the switch.
    pub timeout: u64,
}

/// Request for closed orders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClosedOrdersRequest {
    /// Include trades in output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
    /// Restrict to given user reference ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i32>,
    /// Restrict to given client order ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cl_ord_id: Option<String>,
    /// Start timestamp or order txid (exclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// End timestamp or order txid (inclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Result offset for pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ofs: Option<u32>,
    /// Which time to use (open, close, both).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closetime: Option<CloseTime>,
    /// Consolidate trades by individual taker trades.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consolidate_taker: Option<bool>,
    /// Skip the total count for faster responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub without_count: Option<bool>,
}

/// Request for trades history.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradesHistoryRequest {
    /// Type of trade.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub trade_type: Option<TradeFilter>,
    /// Start timestamp or trade txid (exclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// End timestamp or trade txid (inclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Result offset for pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ofs: Option<u32>,
    /// Consolidate trades by individual taker trades.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consolidate_taker: Option<bool>,
    /// Include related ledger IDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledgers: Option<bool>,
}
