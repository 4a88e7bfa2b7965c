//! Read-only account tools.

use serde_json::json;

use super::{Access, Args, Tool, ToolFuture, object_schema};
use crate::error::KrakenError;
use crate::rest::RestClient;
use crate::rest::private::{ClosedOrdersRequest, TradesHistoryRequest};
use crate::types::{CloseTime, TradeFilter};

type Result<T> = std::result::Result<T, KrakenError>;

pub(super) fn tools() -> Vec<Tool> {
    vec![
        Tool::new(
            "account_balance",
            "Cash balances per asset, net of pending withdrawals.",
            Access::Private,
            object_schema(json!({}), &[]),
            account_balance,
        ),
        Tool::new(
            "closed_orders",
            "Closed (filled or cancelled) orders, 50 per page. Use 'ofs' to page.",
            Access::Private,
            object_schema(
                json!({
                    "trades": {"type": "boolean", "default": false},
                    "userref": {"type": "integer"},
                    "cl_ord_id": {"type": "string"},
                    "start": {"type": ["string", "integer"], "description": "Unix timestamp or order txid (exclusive)."},
                    "end": {"type": ["string", "integer"], "description": "Unix timestamp or order txid (inclusive)."},
                    "ofs": {"type": "integer", "minimum": 0},
                    "closetime": {"type": "string", "enum": CloseTime::VALUES, "default": "both"},
                    "consolidate_taker": {"type": "boolean"},
                    "without_count": {"type": "boolean", "default": false}
                }),
                &[],
            ),
            closed_orders,
        ),
        Tool::new(
            "trades_history",
            "Account trade history, newest first, 50 per page.",
            Access::Private,
            object_schema(
                json!({
                    "type": {"type": "string", "enum": TradeFilter::VALUES, "default": "all"},
                    "start": {"type": ["string", "integer"]},
                    "end": {"type": ["string", "integer"]},
                    "ofs": {"type": "integer", "minimum": 0},
                    "consolidate_taker": {"type": "boolean"},
                    "ledgers": {"type": "boolean"}
                }),
                &[],
            ),
            trades_history,
        ),
    ]
}

fn account_balance(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        args.finish()?;
        client.account_balance().await
    })
}

fn closed_orders(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = closed_orders_request(args)?;
        client.closed_orders(&request).await
    })
}

fn trades_history(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = trades_history_request(args)?;
        client.trades_history(&request).await
    })
}

fn offset(args: &mut Args) -> Result<Option<u32>> {
    args.unsigned_in("ofs", 0..=u64::from(u32::MAX))
}

fn closed_orders_request(mut args: Args) -> Result<ClosedOrdersRequest> {
    let request = ClosedOrdersRequest {
        trades: Some(args.boolean("trades")?.unwrap_or(false)),
        userref: args.int32("userref")?,
        cl_ord_id: args.string("cl_ord_id")?,
        start: args.string("start")?,
        end: args.string("end")?,
        ofs: offset(&mut args)?,
        closetime: Some(args.choice("closetime", CloseTime::VALUES)?.unwrap_or_default()),
        consolidate_taker: args.boolean("consolidate_taker")?,
        without_count: Some(args.boolean("without_count")?.unwrap_or(false)),
    };
    args.finish()?;
    Ok(request)
}

fn trades_history_request(mut args: Args) -> Result<TradesHistoryRequest> {
    let request = TradesHistoryRequest {
        trade_type: Some(args.choice("type", TradeFilter::VALUES)?.unwrap_or_default()),
        start: args.string("start")?,
        end: args.string("end")?,
        ofs: offset(&mut args)?,
        consolidate_taker: args.boolean("consolidate_taker")?,
        ledgers: args.boolean("ledgers")?,
    };
    args.finish()?;
    Ok(request)
}
