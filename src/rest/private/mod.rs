//! Private REST API endpoints (authentication required).
//!
//! These endpoints require credentials to be configured on the client.

mod types;

pub use types::*;

use serde_json::Value;

use crate::error::KrakenError;
use crate::rest::RestClient;
use crate::rest::endpoints::private;

impl RestClient {
    /// Get all cash balances, net of pending withdrawals.
    pub async fn account_balance(&self) -> Result<Value, KrakenError> {
        #[derive(serde::Serialize)]
        struct Empty {}
        self.private_post(private::BALANCE, &Empty {}).await
    }

    /// Get open orders.
    pub async fn open_orders(&self, request: &OpenOrdersRequest) -> Result<Value, KrakenError> {
        self.private_post(private::OPEN_ORDERS, request).await
    }

    /// Get closed orders (filled or cancelled), 50 per page.
    pub async fn closed_orders(&self, request: &ClosedOrdersRequest) -> Result<Value, KrakenError> {
        self.private_post(private::CLOSED_ORDERS, request).await
    }

    /// Get trades history, newest first, 50 per page.
    pub async fn trades_history(
        &self,
        request: &TradesHistoryRequest,
    ) -> Result<Value, KrakenError> {
        self.private_post(private::TRADES_HISTORY, request).await
    }

    /// Add a new order.
    ///
    /// The request is sent as built: a request with `validate` set is only
    /// checked by the exchange and never placed.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kraken_mcp_tools::auth::Credentials;
    /// use kraken_mcp_tools::rest::{RestClient, private::AddOrderRequest};
    /// use kraken_mcp_tools::{BuySell, OrderType};
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Arc::new(Credentials::from_env()?);
    ///     let client = RestClient::builder().credentials(credentials).build()?;
    ///
    ///     let request = AddOrderRequest::new(
    ///         "XBTUSD",
    ///         BuySell::Buy,
    ///         OrderType::Limit,
    ///         Decimal::from_str("0.001")?,
    ///     )
    ///     .price("50000")
    ///     .validate(true);
    ///
    ///     let result = client.add_order(&request).await?;
    ///     println!("Order result: {result}");
    ///     Ok(())
    /// }
    /// ```
    pub async fn add_order(&self, request: &AddOrderRequest) -> Result<Value, KrakenError> {
        self.private_post(private::ADD_ORDER, request).await
    }

    /// Amend an open order in place.
    pub async fn amend_order(&self, request: &AmendOrderRequest) -> Result<Value, KrakenError> {
        self.private_post(private::AMEND_ORDER, request).await
    }

    /// Cancel an order.
    pub async fn cancel_order(&self, request: &CancelOrderRequest) -> Result<Value, KrakenError> {
        self.private_post(private::CANCEL_ORDER, request).await
    }

    /// Arm, reset or disarm the dead man's switch.
    pub async fn cancel_all_orders_after(
        &self,
        request: &CancelAllOrdersAfterRequest,
    ) -> Result<Value, KrakenError> {
        self.private_post(private::CANCEL_ALL_ORDERS_AFTER, request)
            .await
    }
}
