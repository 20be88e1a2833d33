//! End-to-end resolver scenarios against stubbed Fragment and Telegram.

use std::time::Duration;

use tgcheck_core::{Price, ProbeSource, UsernameStatus};
use tgcheck_fetch::{
    ErrorPolicy, FallbackPolicy, FragmentMode, ProbeContext, ProbeSettings, RetryPolicy,
    StatusResolver,
};
use tgcheck_probes::build_resolver;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

const LANDING_PAGE: &str = r#"<!DOCTYPE html><html><head>
<script src="/js/main.js"></script>
<script>ajInit({"version":1,"apiUrl":"\/api?hash=5d1c3a9f07","unauth":true});</script>
</head><body></body></html>"#;

const AVAILABLE_PAGE: &str = r#"<html><head><title>@tobi</title></head><body>
<div class="tm-table-cell tm-col-name">@tobi</div>
<span class="tm-section-header-status">Available</span>
<div class="tm-value">5,050 TON</div>
<button class="btn btn-primary">Buy now</button>
</body></html>"#;

const SOLD_PAGE: &str = r#"<html><head><title>@obito</title></head><body>
<span class="tm-section-header-status">Sold</span>
<div class="tm-value">3,448 TON</div>
</body></html>"#;

const BLANK_PAGE: &str = "<html><head><title>Fragment</title></head><body></body></html>";

fn search_row(name: &str, price: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "html": format!(
            r#"<table><tr>
                <td><div class="table-cell-value tm-value">@{name}</div></td>
                <td><div class="table-cell-value tm-value">{price}</div></td>
                <td><div class="table-cell-value tm-value">{status}</div></td>
            </tr></table>"#
        ),
        "ok": true
    })
}

fn settings(fragment: &MockServer, telegram: &MockServer) -> ProbeSettings {
    ProbeSettings::default()
        .with_fragment_url(fragment.uri())
        .with_telegram_url(telegram.uri())
        .with_retry(RetryPolicy::fixed(3, Duration::from_millis(10)))
        .with_timeouts(Duration::from_millis(500), Duration::from_millis(500))
}

fn resolver(settings: ProbeSettings) -> StatusResolver {
    build_resolver(ProbeContext::with_settings(settings).unwrap())
}

async fn telegram_never_called() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    server
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_available_on_fragment_page() {
    let fragment = MockServer::start().await;
    let telegram = telegram_never_called().await;

    Mock::given(method("GET"))
        .and(path("/username/tobi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(AVAILABLE_PAGE))
        .expect(1)
        .mount(&fragment)
        .await;

    let resolved = resolver(
        settings(&fragment, &telegram).with_fragment_mode(FragmentMode::Web),
    )
    .resolve("@tobi")
    .await
    .unwrap();

    assert_eq!(resolved.username, "@tobi");
    assert_eq!(resolved.status, UsernameStatus::AvailableOnFragment);
    assert_eq!(resolved.price.to_string(), "5,050 Ton");
    assert!(resolved.can_claim);
    assert_eq!(resolved.source, ProbeSource::Fragment);
}

#[tokio::test]
async fn test_available_on_fragment_api() {
    let fragment = MockServer::start().await;
    let telegram = telegram_never_called().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_PAGE))
        .expect(1)
        .mount(&fragment)
        .await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .and(query_param("hash", "5d1c3a9f07"))
        .and(body_string_contains("method=searchAuctions"))
        .and(body_string_contains("query=tobi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_row("tobi", "5,050", "Available")))
        .expect(1)
        .mount(&fragment)
        .await;
    Mock::given(method("GET"))
        .and(path("/username/tobi"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&fragment)
        .await;

    let resolved = resolver(settings(&fragment, &telegram))
        .resolve("Tobi")
        .await
        .unwrap();

    assert_eq!(resolved.status, UsernameStatus::AvailableOnFragment);
    assert_eq!(resolved.price.to_string(), "5,050 Ton");
    assert!(resolved.can_claim);
}

#[tokio::test]
async fn test_not_for_sale_on_fragment_api() {
    let fragment = MockServer::start().await;
    let telegram = telegram_never_called().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_PAGE))
        .mount(&fragment)
        .await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_row("obito", "3,448", "Unavailable")))
        .mount(&fragment)
        .await;

    let resolved = resolver(settings(&fragment, &telegram).with_fragment_mode(FragmentMode::Api))
        .resolve("obito")
        .await
        .unwrap();

    assert_eq!(resolved.status, UsernameStatus::SoldOnFragment);
    assert_eq!(resolved.price, Price::NotApplicable);
    assert_eq!(resolved.message, "Not for sale on Fragment");
    assert!(!resolved.can_claim);
}

#[tokio::test]
async fn test_sold_on_fragment_page() {
    let fragment = MockServer::start().await;
    let telegram = telegram_never_called().await;

    Mock::given(method("GET"))
        .and(path("/username/obito"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SOLD_PAGE))
        .mount(&fragment)
        .await;

    let resolved = resolver(settings(&fragment, &telegram).with_fragment_mode(FragmentMode::Web))
        .resolve("obito")
        .await
        .unwrap();

    assert_eq!(resolved.status, UsernameStatus::SoldOnFragment);
    assert_eq!(resolved.price.to_string(), "3,448 Ton");
    assert!(!resolved.can_claim);
    assert_eq!(resolved.source, ProbeSource::Fragment);
}

#[tokio::test]
async fn test_taken_via_telegram_when_fragment_inconclusive() {
    let fragment = MockServer::start().await;
    let telegram = MockServer::start().await;

    // Landing page without a hash: the API strategy gives up without retrying.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BLANK_PAGE))
        .expect(1)
        .mount(&fragment)
        .await;
    Mock::given(method("GET"))
        .and(path("/username/aotpy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BLANK_PAGE))
        .expect(1)
        .mount(&fragment)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/aotpy"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&telegram)
        .await;

    let resolved = resolver(settings(&fragment, &telegram))
        .resolve("aotpy")
        .await
        .unwrap();

    assert_eq!(resolved.username, "@aotpy");
    assert_eq!(resolved.status, UsernameStatus::Taken);
    assert_eq!(resolved.source, ProbeSource::Telegram);
    assert_eq!(resolved.price, Price::NotApplicable);
    assert!(!resolved.can_claim);
}

#[tokio::test]
async fn test_available_via_telegram_redirect() {
    let fragment = MockServer::start().await;
    let telegram = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/username/freename"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BLANK_PAGE))
        .mount(&fragment)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/freename"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/+c2lnbnVw"))
        .expect(1)
        .mount(&telegram)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/+c2lnbnVw"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&telegram)
        .await;

    let resolved = resolver(settings(&fragment, &telegram).with_fragment_mode(FragmentMode::Web))
        .resolve("freename")
        .await
        .unwrap();

    assert_eq!(resolved.status, UsernameStatus::Available);
    assert_eq!(resolved.message, "Available on Telegram");
    assert_eq!(resolved.source, ProbeSource::Telegram);
}

#[tokio::test]
async fn test_timeout_after_three_attempts() {
    let fragment = MockServer::start().await;
    let telegram = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
        .expect(3)
        .mount(&fragment)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
        .expect(1)
        .mount(&telegram)
        .await;

    let settings = settings(&fragment, &telegram)
        .with_fragment_mode(FragmentMode::Api)
        .with_timeouts(Duration::from_millis(100), Duration::from_millis(100));

    let resolved = resolver(settings).resolve("slowpoke").await.unwrap();

    assert_eq!(resolved.status, UsernameStatus::Error);
    assert_eq!(resolved.source, ProbeSource::Fragment);
    assert!(resolved.message.to_lowercase().contains("timeout"));
    assert!(resolved.message.contains("3 attempts"));
}

#[tokio::test]
async fn test_not_found_page() {
    let fragment = MockServer::start().await;
    let telegram = telegram_never_called().await;

    Mock::given(method("GET"))
        .and(path("/username/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&fragment)
        .await;

    let resolved = resolver(settings(&fragment, &telegram).with_fragment_mode(FragmentMode::Web))
        .resolve("ghost")
        .await
        .unwrap();

    assert_eq!(resolved.status, UsernameStatus::NotFound);
}

#[tokio::test]
async fn test_upstream_error_with_stop_policy() {
    let fragment = MockServer::start().await;
    let telegram = telegram_never_called().await;

    Mock::given(method("GET"))
        .and(path("/username/someone"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&fragment)
        .await;

    let settings = settings(&fragment, &telegram)
        .with_fragment_mode(FragmentMode::Web)
        .with_fallback(FallbackPolicy {
            on_error: ErrorPolicy::Stop,
            confirm_with_telegram: Vec::new(),
        });

    let resolved = resolver(settings).resolve("someone").await.unwrap();

    assert_eq!(resolved.status, UsernameStatus::Error);
    assert_eq!(resolved.message, "Fragment returned HTTP 503");
    assert_eq!(resolved.price, Price::Unknown);
}

/// Fragment in API mode with a working landing page and the given search
/// reply. The servers are returned so their expectations are checked on drop.
async fn api_search_replying(
    response: ResponseTemplate,
) -> (StatusResolver, MockServer, MockServer) {
    let fragment = MockServer::start().await;
    let telegram = telegram_never_called().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_PAGE))
        .expect(1)
        .mount(&fragment)
        .await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(response)
        .expect(1)
        .mount(&fragment)
        .await;

    let settings = settings(&fragment, &telegram)
        .with_fragment_mode(FragmentMode::Api)
        .with_fallback(FallbackPolicy {
            on_error: ErrorPolicy::Stop,
            confirm_with_telegram: Vec::new(),
        });

    (resolver(settings), fragment, telegram)
}

#[tokio::test]
async fn test_api_search_http_error_is_not_retried() {
    let (resolver, _fragment, _telegram) = api_search_replying(ResponseTemplate::new(502)).await;

    let resolved = resolver.resolve("someone").await.unwrap();

    assert_eq!(resolved.status, UsernameStatus::Error);
    assert_eq!(
        resolved.message,
        "Fragment request failed: Upstream returned HTTP 502"
    );
    assert_eq!(resolved.source, ProbeSource::Fragment);
}

#[tokio::test]
async fn test_api_search_error_field() {
    let reply = serde_json::json!({ "error": "Access denied" });
    let (resolver, _fragment, _telegram) =
        api_search_replying(ResponseTemplate::new(200).set_body_json(reply)).await;

    let resolved = resolver.resolve("someone").await.unwrap();

    assert_eq!(resolved.status, UsernameStatus::Error);
    assert_eq!(
        resolved.message,
        "Fragment request failed: Invalid response: Access denied"
    );
}

#[tokio::test]
async fn test_empty_input_makes_no_calls() {
    let fragment = MockServer::start().await;
    let telegram = telegram_never_called().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&fragment)
        .await;

    let resolver = resolver(settings(&fragment, &telegram));

    for raw in ["", "  ", "@"] {
        let err = resolver.resolve(raw).await.unwrap_err();
        assert_eq!(err.to_string(), "Username is required");
    }
}
