use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use rust_decimal::Decimal;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kraken_mcp_tools::auth::{Credentials, NonceProvider, sign_request};
use kraken_mcp_tools::error::{ErrorKind, KrakenError};
use kraken_mcp_tools::rest::RestClient;
use kraken_mcp_tools::rest::private::AddOrderRequest;
use kraken_mcp_tools::rest::public::{AssetInfoRequest, OhlcRequest};
use kraken_mcp_tools::types::OhlcInterval;
use kraken_mcp_tools::{BuySell, OrderType};

const NONCE: u64 = 1_616_492_376_594;

struct FixedNonce(u64);

impl NonceProvider for FixedNonce {
    fn next_nonce(&self) -> u64 {
        self.0
    }
}

fn credentials() -> Arc<Credentials> {
    Arc::new(Credentials::new("test_key", STANDARD.encode("test_secret")).unwrap())
}

fn build_public_client(server: &MockServer) -> RestClient {
    RestClient::builder().base_url(server.uri()).build().unwrap()
}

fn build_private_client(server: &MockServer) -> RestClient {
    RestClient::builder()
        .base_url(server.uri())
        .credentials(credentials())
        .nonce_provider(Arc::new(FixedNonce(NONCE)))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_server_time() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "unixtime": 1_700_000_000,
            "rfc1123": "Fri, 01 Dec 2023 00:00:00 GMT"
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let time = assert_ok!(build_public_client(&server).server_time().await);
    assert_eq!(time["unixtime"], 1_700_000_000);
    assert_eq!(time["rfc1123"], "Fri, 01 Dec 2023 00:00:00 GMT");
}

#[tokio::test]
async fn test_assets_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/0/public/Assets"))
        .and(query_param("asset", "XBT,ETH"))
        .and(query_param("aclass", "currency"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": {"XXBT": {"altname": "XBT", "decimals": 10}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = AssetInfoRequest {
        asset: Some("XBT,ETH".to_string()),
        aclass: Some("currency".to_string()),
    };
    let assets = build_public_client(&server).assets(&request).await.unwrap();
    assert_eq!(assets["XXBT"]["altname"], "XBT");
}

#[tokio::test]
async fn test_ohlc_passes_result_through_unchanged() {
    let server = MockServer::start().await;
    let body = r#"{"error":[],"result":{"XXBTZUSD":[[1700000000,"37000.1","37100.0","36900.5","37050.0","37010.2","12.34567890",321]],"last":1700000000}}"#;

    Mock::given(method("GET"))
        .and(path("/0/public/OHLC"))
        .and(query_param("pair", "XBTUSD"))
        .and(query_param("interval", "60"))
        .and(query_param("since", "1699990000"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let mut request = OhlcRequest::new("XBTUSD", OhlcInterval::Hour1);
    request.since = Some(1_699_990_000);
    let result = build_public_client(&server).ohlc(&request).await.unwrap();

    let expected: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(result, expected["result"]);
    assert_eq!(result["XXBTZUSD"][0][6], "12.34567890");
}

#[tokio::test]
async fn test_private_request_is_signed() {
    let server = MockServer::start().await;
    let request = AddOrderRequest::new(
        "XBTUSD",
        BuySell::Buy,
        OrderType::Limit,
        Decimal::from_str("1.25").unwrap(),
    )
    .price("37500")
    .validate(true);

    let expected_body =
        format!("nonce={NONCE}&pair=XBTUSD&type=buy&ordertype=limit&volume=1.25&price=37500&validate=true");
    let expected_sign =
        sign_request(&credentials(), "/0/private/AddOrder", NONCE, &expected_body).unwrap();

    Mock::given(method("POST"))
        .and(path("/0/private/AddOrder"))
        .and(header("API-Key", "test_key"))
        .and(header("API-Sign", expected_sign.as_str()))
        .and(header(
            "Content-Type",
            "application/x-www-form-urlencoded; charset=utf-8",
        ))
        .and(body_string(expected_body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": {"descr": {"order": "buy 1.25000000 XBTUSD @ limit 37500.0"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = build_private_client(&server)
        .add_order(&request)
        .await
        .unwrap();
    assert_eq!(
        result["descr"]["order"],
        "buy 1.25000000 XBTUSD @ limit 37500.0"
    );
}

#[tokio::test]
async fn test_exchange_error_keeps_every_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": ["EAPI:Invalid nonce", "EGeneral:Temporary lockout"]
        })))
        .mount(&server)
        .await;

    let err = build_private_client(&server)
        .account_balance()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExchangeError);
    assert_eq!(err.codes(), ["EAPI:Invalid nonce", "EGeneral:Temporary lockout"]);
    match err {
        KrakenError::Api(api) => assert!(api.is_invalid_nonce()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_error_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": ["EAPI:Rate limit exceeded"],
            "result": null
        })))
        .mount(&server)
        .await;

    let err = build_public_client(&server).server_time().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExchangeError);
    assert_eq!(err.codes(), ["EAPI:Rate limit exceeded"]);
}

#[tokio::test]
async fn test_non_success_status_is_exchange_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/0/public/SystemStatus"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = build_public_client(&server)
        .system_status()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExchangeError);
    assert!(err.to_string().contains("503"), "{err}");
}

#[tokio::test]
async fn test_missing_result_is_exchange_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": []})))
        .mount(&server)
        .await;

    let err = build_public_client(&server).server_time().await.unwrap_err();
    assert!(matches!(err, KrakenError::InvalidResponse(_)));
    assert_eq!(err.kind(), ErrorKind::ExchangeError);
}

#[tokio::test]
async fn test_slow_response_times_out_as_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"error": [], "result": {"unixtime": 0}}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = RestClient::builder()
        .base_url(server.uri())
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let err = assert_err!(client.server_time().await);
    assert_eq!(err.kind(), ErrorKind::NetworkError, "{err:?}");
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind and drop a listener to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = RestClient::builder()
        .base_url(format!("http://127.0.0.1:{port}"))
        .build()
        .unwrap();

    let err = assert_err!(client.server_time().await);
    assert_eq!(err.kind(), ErrorKind::NetworkError, "{err:?}");
}
