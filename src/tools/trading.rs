//! Order entry and order management tools.

use serde_json::json;
use tracing::info;

use super::{Access, Args, Tool, ToolFuture, object_schema};
use crate::error::KrakenError;
use crate::rest::RestClient;
use crate::rest::private::{
    AddOrderRequest, AmendOrderRequest, CancelAllOrdersAfterRequest, CancelOrderRequest,
    OpenOrdersRequest,
};
use crate::types::{BuySell, OrderType, TimeInForce};

type Result<T> = std::result::Result<T, KrakenError>;

pub(super) fn tools() -> Vec<Tool> {
    vec![
        Tool::new(
            "add_order",
            "Place an order. 'validate' defaults to true (checked by Kraken, not placed); \
             set validate=false to place a live order.",
            Access::Private,
            object_schema(
                json!({
                    "pair": {"type": "string", "description": "Asset pair, e.g. 'XBTUSD'."},
                    "side": {"type": "string", "enum": BuySell::VALUES},
                    "ordertype": {"type": "string", "enum": OrderType::VALUES, "default": "limit"},
                    "volume": {"type": ["string", "number"], "description": "Order volume in base currency."},
                    "price": {"type": ["string", "number"], "description": "Limit or trigger price. Relative forms like '+50', '-2%' or '#5' are passed through; trailing stops need a '+' offset."},
                    "price2": {"type": ["string", "number"], "description": "Limit price of *-limit trigger orders, absolute or relative."},
                    "timeinforce": {"type": "string", "enum": TimeInForce::VALUES},
                    "userref": {"type": "integer"},
                    "cl_ord_id": {"type": "string"},
                    "validate": {"type": "boolean", "default": true}
                }),
                &["pair", "side", "volume"],
            ),
            add_order,
        ),
        Tool::new(
            "cancel_order",
            "Cancel an order by txid, client order id or user reference.",
            Access::Private,
            object_schema(
                json!({
                    "txid": {"type": "string", "description": "Order txid, cl_ord_id or userref."},
                    "txid_or_userref": {"type": "string", "description": "Alias of txid."}
                }),
                &[],
            ),
            cancel_order,
        ),
        Tool::new(
            "amend_order",
            "Amend an open order in place. Give exactly one of order_id or cl_ord_id, \
             and at least one field to change.",
            Access::Private,
            object_schema(
                json!({
                    "order_id": {"type": "string"},
                    "cl_ord_id": {"type": "string"},
                    "order_qty": {"type": ["string", "number"]},
                    "display_qty": {"type": ["string", "number"]},
                    "limit_price": {"type": ["string", "number"]},
                    "trigger_price": {"type": ["string", "number"]},
                    "post_only": {"type": "boolean"}
                }),
                &[],
            ),
            amend_order,
        ),
        Tool::new(
            "open_orders",
            "List open orders.",
            Access::Private,
            object_schema(
                json!({
                    "userref": {"type": "integer"},
                    "trades": {"type": "boolean", "default": false},
                    "cl_ord_id": {"type": "string"}
                }),
                &[],
            ),
            open_orders,
        ),
        Tool::new(
            "cancel_all_orders_after",
            "Dead man's switch: cancel all orders after N seconds unless reset. 0 disables it.",
            Access::Private,
            object_schema(
                json!({
                    "timeout_seconds": {"type": "integer", "minimum": 0},
                    "timeout": {"type": "integer", "minimum": 0, "description": "Alias of timeout_seconds."}
                }),
                &[],
            ),
            cancel_all_orders_after,
        ),
    ]
}

fn add_order(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = add_order_request(args)?;
        if !request.is_validate_only() {
            info!(
                pair = %request.pair,
                side = %request.side,
                ordertype = %request.ordertype,
                volume = %request.volume,
                "placing live order"
            );
        }
        client.add_order(&request).await
    })
}

fn cancel_order(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = cancel_order_request(args)?;
        client.cancel_order(&request).await
    })
}

fn amend_order(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = amend_order_request(args)?;
        client.amend_order(&request).await
    })
}

fn open_orders(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = open_orders_request(args)?;
        client.open_orders(&request).await
    })
}

fn cancel_all_orders_after(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = cancel_all_orders_after_request(args)?;
        client.cancel_all_orders_after(&request).await
    })
}

fn add_order_request(mut args: Args) -> Result<AddOrderRequest> {
    let pair = args.required_string("pair")?;
    let side = args
        .choice::<BuySell>("side", BuySell::VALUES)?
        .ok_or_else(|| KrakenError::Validation("side is required".to_string()))?;
    let ordertype = args
        .choice::<OrderType>("ordertype", OrderType::VALUES)?
        .unwrap_or(OrderType::Limit);
    let volume = args
        .positive_decimal("volume")?
        .ok_or_else(|| KrakenError::Validation("volume is required".to_string()))?;

    let mut request = AddOrderRequest::new(pair, side, ordertype, volume);
    request.price = args.price("price")?;
    request.price2 = args.price("price2")?;
    request.timeinforce = args.choice("timeinforce", TimeInForce::VALUES)?;
    request.userref = args.int32("userref")?;
    request.cl_ord_id = args.string("cl_ord_id")?;
    let request = request.validate(args.boolean("validate")?.unwrap_or(true));
    args.finish()?;

    if ordertype.requires_price() && request.price.is_none() {
        return Err(KrakenError::Validation(format!(
            "price is required for {ordertype} orders"
        )));
    }
    if ordertype.requires_secondary_price() && request.price2.is_none() {
        return Err(KrakenError::Validation(format!(
            "price2 is required for {ordertype} orders"
        )));
    }
    Ok(request)
}

fn cancel_order_request(mut args: Args) -> Result<CancelOrderRequest> {
    args.alias("txid", "txid_or_userref")?;
    let txid = args.required_string("txid")?;
    args.finish()?;
    if txid.contains(',') {
        return Err(KrakenError::Validation(
            "txid must name a single order".to_string(),
        ));
    }
    Ok(CancelOrderRequest::new(txid))
}

fn amend_order_request(mut args: Args) -> Result<AmendOrderRequest> {
    let request = AmendOrderRequest {
        txid: args.string("order_id")?,
        cl_ord_id: args.string("cl_ord_id")?,
        order_qty: args.positive_decimal("order_qty")?,
        display_qty: args.positive_decimal("display_qty")?,
        limit_price: args.price("limit_price")?,
        trigger_price: args.price("trigger_price")?,
        post_only: args.boolean("post_only")?,
    };
    args.finish()?;

    match (&request.txid, &request.cl_ord_id) {
        (Some(_), Some(_)) => {
            return Err(KrakenError::Validation(
                "give either order_id or cl_ord_id, not both".to_string(),
            ));
        }
        (None, None) => {
            return Err(KrakenError::Validation(
                "order_id or cl_ord_id is required".to_string(),
            ));
        }
        _ => {}
    }
    if !request.has_changes() {
        return Err(KrakenError::Validation(
            "at least one of order_qty, limit_price, trigger_price or display_qty is required"
                .to_string(),
        ));
    }
    Ok(request)
}

fn open_orders_request(mut args: Args) -> Result<OpenOrdersRequest> {
    let request = OpenOrdersRequest {
        trades: Some(args.boolean("trades")?.unwrap_or(false)),
        userref: args.int32("userref")?,
        cl_ord_id: args.string("cl_ord_id")?,
    };
    args.finish()?;
    Ok(request)
}

fn cancel_all_orders_after_request(mut args: Args) -> Result<CancelAllOrdersAfterRequest> {
    args.alias("timeout_seconds", "timeout")?;
    let timeout = args
        .unsigned("timeout_seconds")?
        .ok_or_else(|| KrakenError::Validation("timeout_seconds is required".to_string()))?;
    args.finish()?;
    Ok(CancelAllOrdersAfterRequest { timeout })
}
