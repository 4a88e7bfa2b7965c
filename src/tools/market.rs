//! Public market-data tools.

use serde_json::json;

use super::{Access, Args, Tool, ToolFuture, object_schema};
use crate::error::KrakenError;
use crate::rest::RestClient;
use crate::rest::public::{
    AssetInfoRequest, AssetPairsRequest, OhlcRequest, OrderBookRequest, RecentSpreadsRequest,
    RecentTradesRequest, TickerRequest,
};
use crate::types::{AssetPairInfo, OhlcInterval};

type Result<T> = std::result::Result<T, KrakenError>;

pub(super) fn tools() -> Vec<Tool> {
    vec![
        Tool::new(
            "server_time",
            "Kraken server time (UTC).",
            Access::Public,
            object_schema(json!({}), &[]),
            server_time,
        ),
        Tool::new(
            "system_status",
            "Current system status / trading mode (online, maintenance, cancel_only, post_only).",
            Access::Public,
            object_schema(json!({}), &[]),
            system_status,
        ),
        Tool::new(
            "asset_info",
            "Asset metadata. Example assets: 'XBT,ETH,USDT'.",
            Access::Public,
            object_schema(
                json!({
                    "assets": {"type": "string", "description": "Comma-separated assets; omit for all."},
                    "aclass": {"type": "string", "description": "Asset class, default 'currency'."}
                }),
                &[],
            ),
            asset_info,
        ),
        Tool::new(
            "tradable_asset_pairs",
            "Tradable pairs and their metadata. Example pairs: 'XBTUSD,ETHUSD'.",
            Access::Public,
            object_schema(
                json!({
                    "pairs": {"type": "string", "description": "Comma-separated pairs; omit for all."},
                    "info": {"type": "string", "enum": AssetPairInfo::VALUES}
                }),
                &[],
            ),
            tradable_asset_pairs,
        ),
        Tool::new(
            "ticker",
            "Level-1 ticker stats. Leave 'pairs' empty to get all pairs.",
            Access::Public,
            object_schema(
                json!({
                    "pairs": {"type": "string", "description": "Comma-separated pairs, e.g. 'XBTUSD,ETHUSD'."}
                }),
                &[],
            ),
            ticker,
        ),
        Tool::new(
            "ohlc",
            "OHLC candles. 'since' is a Unix timestamp or the 'last' id of a previous call.",
            Access::Public,
            object_schema(
                json!({
                    "pair": {"type": "string"},
                    "interval": {"type": "integer", "enum": OhlcInterval::MINUTES, "default": 1, "description": "Minutes per candle."},
                    "since": {"type": "integer", "minimum": 0}
                }),
                &["pair"],
            ),
            ohlc,
        ),
        Tool::new(
            "order_book",
            "Level-2 order book aggregated per price level.",
            Access::Public,
            object_schema(
                json!({
                    "pair": {"type": "string"},
                    "count": {"type": "integer", "minimum": 1, "maximum": 500, "description": "Max levels per side."}
                }),
                &["pair"],
            ),
            order_book,
        ),
        Tool::new(
            "recent_trades",
            "Recent trades. Use the returned 'last' field as the next 'since'.",
            Access::Public,
            object_schema(
                json!({
                    "pair": {"type": "string"},
                    "since": {"type": "integer", "minimum": 0},
                    "count": {"type": "integer", "minimum": 1, "maximum": 1000}
                }),
                &["pair"],
            ),
            recent_trades,
        ),
        Tool::new(
            "recent_spreads",
            "Recent top-of-book spreads (bid/ask).",
            Access::Public,
            object_schema(
                json!({
                    "pair": {"type": "string"},
                    "since": {"type": "integer", "minimum": 0}
                }),
                &["pair"],
            ),
            recent_spreads,
        ),
    ]
}

fn server_time(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        args.finish()?;
        client.server_time().await
    })
}

fn system_status(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        args.finish()?;
        client.system_status().await
    })
}

fn asset_info(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = asset_info_request(args)?;
        client.assets(&request).await
    })
}

fn tradable_asset_pairs(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = asset_pairs_request(args)?;
        client.asset_pairs(&request).await
    })
}

fn ticker(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = ticker_request(args)?;
        client.ticker(&request).await
    })
}

fn ohlc(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = ohlc_request(args)?;
        client.ohlc(&request).await
    })
}

fn order_book(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = order_book_request(args)?;
        client.order_book(&request).await
    })
}

fn recent_trades(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = recent_trades_request(args)?;
        client.recent_trades(&request).await
    })
}

fn recent_spreads(client: &RestClient, args: Args) -> ToolFuture<'_> {
    Box::pin(async move {
        let request = recent_spreads_request(args)?;
        client.recent_spreads(&request).await
    })
}

fn asset_info_request(mut args: Args) -> Result<AssetInfoRequest> {
    let request = AssetInfoRequest {
        asset: args.string("assets")?,
        aclass: args.string("aclass")?,
    };
    args.finish()?;
    Ok(request)
}

fn asset_pairs_request(mut args: Args) -> Result<AssetPairsRequest> {
    let request = AssetPairsRequest {
        pair: args.string("pairs")?,
        info: args.choice("info", AssetPairInfo::VALUES)?,
    };
    args.finish()?;
    Ok(request)
}

fn ticker_request(mut args: Args) -> Result<TickerRequest> {
    let request = TickerRequest {
        pair: args.string("pairs")?,
    };
    args.finish()?;
    Ok(request)
}

fn ohlc_request(mut args: Args) -> Result<OhlcRequest> {
    let pair = args.required_string("pair")?;
    let interval = match args.unsigned("interval")? {
        None => OhlcInterval::default(),
        Some(minutes) => u32::try_from(minutes)
            .ok()
            .and_then(|m| OhlcInterval::try_from(m).ok())
            .ok_or_else(|| {
                KrakenError::Validation(format!(
                    "interval must be one of: {}",
                    join(OhlcInterval::MINUTES)
                ))
            })?,
    };
    let request = OhlcRequest {
        pair,
        interval,
        since: args.unsigned("since")?,
    };
    args.finish()?;
    Ok(request)
}

fn order_book_request(mut args: Args) -> Result<OrderBookRequest> {
    let request = OrderBookRequest {
        pair: args.required_string("pair")?,
        count: args.unsigned_in("count", 1..=500)?,
    };
    args.finish()?;
    Ok(request)
}

fn recent_trades_request(mut args: Args) -> Result<RecentTradesRequest> {
    let request = RecentTradesRequest {
        pair: args.required_string("pair")?,
        since: args.unsigned("since")?,
        count: args.unsigned_in("count", 1..=1000)?,
    };
    args.finish()?;
    Ok(request)
}

fn recent_spreads_request(mut args: Args) -> Result<RecentSpreadsRequest> {
    let request = RecentSpreadsRequest {
        pair: args.required_string("pair")?,
        since: args.unsigned("since")?,
    };
    args.finish()?;
    Ok(request)
}

fn join(values: &[u32]) -> String {
    values
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
