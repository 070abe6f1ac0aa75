//! Integration tests for the transport layer.
//!
//! These tests verify authentication headers, content-type classification,
//! error surfacing and report downloads against a mock server.

use std::io::Write;
use std::sync::Arc;

use appstoreconnect::auth::token::AUDIENCE;
use appstoreconnect::auth::{Claims, JwtTokenProvider};
use appstoreconnect::clients::{DecodedResponse, HttpMethod, HttpRequest, SDK_VERSION};
use appstoreconnect::rest::Filters;
use appstoreconnect::{
    AppStoreConnectClient, AppStoreConnectConfig, AuthError, BaseUrl, HttpError, IssuerId, KeyId,
    PrivateKey, TokenProvider,
};
use flate2::write::GzEncoder;
use flate2::Compression;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRIVATE_KEY_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/AuthKey_TESTKEY01.p8"
);
const PUBLIC_KEY: &str = include_str!("fixtures/AuthKey_TESTKEY01.pub.pem");

#[derive(Debug)]
struct StaticToken;

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Result<String, AuthError> {
        Ok("test-token".to_string())
    }
}

fn create_client(server: &MockServer) -> AppStoreConnectClient {
    AppStoreConnectClient::with_token_provider(
        &BaseUrl::new(server.uri()).unwrap(),
        Arc::new(StaticToken),
    )
    .unwrap()
}

fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_requests_carry_signed_bearer_token() {
    let server = MockServer::start().await;
    let provider = Arc::new(
        JwtTokenProvider::new(
            KeyId::new("TESTKEY01").unwrap(),
            IssuerId::new("issuer-1").unwrap(),
            &PrivateKey::from_file(PRIVATE_KEY_PATH).unwrap(),
        )
        .unwrap(),
    );
    let token = provider.bearer_token().unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(2)
        .mount(&server)
        .await;

    let client = AppStoreConnectClient::with_token_provider(
        &BaseUrl::new(server.uri()).unwrap(),
        provider,
    )
    .unwrap();

    // The cached token is reused across requests
    client.get_json("/v1/apps").await.unwrap();
    client.get_json("/v1/apps").await.unwrap();

    let header = decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::ES256);
    assert_eq!(header.kid.as_deref(), Some("TESTKEY01"));

    let mut validation = Validation::new(Algorithm::ES256);
    validation.set_audience(&[AUDIENCE]);
    let claims = decode::<Claims>(
        &token,
        &DecodingKey::from_ec_pem(PUBLIC_KEY.as_bytes()).unwrap(),
        &validation,
    )
    .unwrap()
    .claims;
    assert_eq!(claims.iss, "issuer-1");
    assert_eq!(claims.exp - claims.iat, 20 * 60);
}

#[tokio::test]
async fn test_client_from_config_sends_user_agent_prefix() {
    let server = MockServer::start().await;
    let user_agent =
        format!("release-bot | App Store Connect API Library v{SDK_VERSION} | Rust 1.75");
    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .and(header("user-agent", user_agent.as_str()))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = AppStoreConnectConfig::builder()
        .key_id(KeyId::new("TESTKEY01").unwrap())
        .issuer_id(IssuerId::new("issuer-1").unwrap())
        .private_key(PrivateKey::from_file(PRIVATE_KEY_PATH).unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .user_agent_prefix("release-bot")
        .build()
        .unwrap();
    let client = AppStoreConnectClient::new(&config).unwrap();

    client.get_json("/v1/users").await.unwrap();
}

// ============================================================================
// Response classification
// ============================================================================

#[tokio::test]
async fn test_json_api_media_type_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"data": [], "meta": {"paging": {"total": 0}}}"#, "application/vnd.api+json"),
        )
        .mount(&server)
        .await;
    let client = create_client(&server);

    let document = client.get_json("/v1/apps").await.unwrap();
    assert_eq!(document["meta"]["paging"]["total"], json!(0));
}

#[tokio::test]
async fn test_error_entry_without_detail_uses_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"status": "not-a-number", "code": "NOT_AUTHORIZED"}]
        })))
        .mount(&server)
        .await;
    let client = create_client(&server);

    let error = client.get("/v1/apps").await.unwrap_err();
    match error {
        HttpError::Api(api) => {
            assert_eq!(api.detail, "Unknown error");
            assert_eq!(api.status, None);
        }
        other => panic!("Expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_errors_array_wins_even_with_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"status": "409", "detail": "Conflict"}]
        })))
        .mount(&server)
        .await;
    let client = create_client(&server);

    let error = client.get("/v1/apps").await.unwrap_err();
    assert_eq!(error.api_error().map(|e| e.status), Some(Some(409)));
}

#[tokio::test]
async fn test_plain_text_failure_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .respond_with(ResponseTemplate::new(502).set_body_raw("Bad gateway", "text/plain"))
        .mount(&server)
        .await;
    let client = create_client(&server);

    let error = client.get("/v1/apps").await.unwrap_err();
    let api = error.api_error().unwrap();
    assert_eq!(api.detail, "Bad gateway");
    assert_eq!(api.status, Some(502));
}

#[tokio::test]
async fn test_plain_text_success_is_returned_raw() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/betaGroups/g1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let client = create_client(&server);

    match client.delete_url("/v1/betaGroups/g1").await.unwrap() {
        DecodedResponse::Raw(raw) => {
            assert_eq!(raw.status, 204);
            assert!(raw.body.is_empty());
        }
        other => panic!("Expected raw response, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_extra_headers_override_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .and(header("accept", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_client(&server);

    let request = HttpRequest::builder(HttpMethod::Get, "/v1/apps")
        .header("Accept", "application/vnd.api+json")
        .build()
        .unwrap();
    client.send(request).await.unwrap();
}

// ============================================================================
// Reports
// ============================================================================

#[tokio::test]
async fn test_sales_report_applies_defaults_and_decompresses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/salesReports"))
        .and(header("accept", "application/a-gzip"))
        .and(query_param("filter[vendorNumber]", "85012345"))
        .and(query_param("filter[frequency]", "WEEKLY"))
        .and(query_param("filter[reportSubType]", "SUMMARY"))
        .and(query_param("filter[reportType]", "SALES"))
        .and(query_param("filter[version]", "1_0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            gzip("Provider\tSKU\tUnits\nAPPLE\tEX1\t3\nAPPLE\tEX2\t5\n"),
            "application/a-gzip",
        ))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_client(&server);

    let report = client
        .download_sales_report(
            Filters::new()
                .with("vendorNumber", "85012345")
                .with("frequency", "WEEKLY"),
        )
        .await
        .unwrap();

    assert_eq!(report.header(), Some(vec!["Provider", "SKU", "Units"]));
    let units: Vec<&str> = report.records().map(|row| row[2]).collect();
    assert_eq!(units, vec!["3", "5"]);
}

#[tokio::test]
async fn test_finance_report_applies_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/financeReports"))
        .and(query_param("filter[regionCode]", "ZZ"))
        .and(query_param("filter[reportType]", "FINANCIAL"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(gzip("Start Date\tEnd Date\n"), "application/x-gzip"),
        )
        .expect(1)
        .mount(&server)
        .await;
    let client = create_client(&server);

    let report = client
        .download_finance_report(Filters::new().with("vendorNumber", "1"))
        .await
        .unwrap();
    assert_eq!(report.records().count(), 0);
}

#[tokio::test]
async fn test_report_error_document_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/salesReports"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"status": "404", "detail": "There were no sales for the date specified."}]
        })))
        .mount(&server)
        .await;
    let client = create_client(&server);

    let error = client.download_sales_report(Filters::new()).await.unwrap_err();
    assert_eq!(error.api_error().unwrap().status, Some(404));
}

#[tokio::test]
async fn test_report_json_success_is_unexpected_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/financeReports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;
    let client = create_client(&server);

    let error = client.download_finance_report(Filters::new()).await.unwrap_err();
    assert!(matches!(error, HttpError::UnexpectedContent { .. }));
}

#[tokio::test]
async fn test_corrupt_gzip_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/salesReports"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not gzip", "application/gzip"))
        .mount(&server)
        .await;
    let client = create_client(&server);

    let error = client.download_sales_report(Filters::new()).await.unwrap_err();
    assert!(matches!(error, HttpError::Decode { .. }));
}
