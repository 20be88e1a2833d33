//! Serde tests for core types.
//!
//! These tests pin the wire format of the response body.

use serde_json::{Value, json};

use crate::{Price, ProbeResult, ProbeSource, ResolvedStatus, UsernameQuery, UsernameStatus};

// ============================================================================
// UsernameStatus Serde Tests
// ============================================================================

#[test]
fn test_status_serializes_snake_case() {
    let cases = [
        (UsernameStatus::AvailableOnFragment, "available_on_fragment"),
        (UsernameStatus::SoldOnFragment, "sold_on_fragment"),
        (UsernameStatus::NotOnFragment, "not_on_fragment"),
        (UsernameStatus::Taken, "taken"),
        (UsernameStatus::NotFound, "not_found"),
        (UsernameStatus::Available, "available"),
        (UsernameStatus::Unknown, "unknown"),
        (UsernameStatus::Error, "error"),
    ];

    for (status, expected) in cases {
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json, Value::String(expected.to_string()), "for {status:?}");
    }
}

#[test]
fn test_other_status_is_raw_string() {
    let status = UsernameStatus::Other("On auction".to_string());
    assert_eq!(serde_json::to_string(&status).unwrap(), r#""On auction""#);
}

#[test]
fn test_source_deserialize_lowercase() {
    let source: ProbeSource = serde_json::from_str(r#""telegram""#).unwrap();
    assert_eq!(source, ProbeSource::Telegram);
    assert!(serde_json::from_str::<ProbeSource>(r#""twitter""#).is_err());
}

// ============================================================================
// ResolvedStatus Serde Tests
// ============================================================================

#[test]
fn test_resolved_status_has_exactly_six_keys() {
    let query = UsernameQuery::parse("@tobi").unwrap();
    let result = ProbeResult::new(
        UsernameStatus::AvailableOnFragment,
        ProbeSource::Fragment,
        "Available on Fragment marketplace",
    )
    .with_price(Price::Ton("5,050".to_string()))
    .with_title_hint(Some(UsernameStatus::SoldOnFragment));

    let json = serde_json::to_value(ResolvedStatus::from_probe(&query, result)).unwrap();
    let object = json.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["can_claim", "message", "price", "source", "status", "username"]
    );
}

#[test]
fn test_resolved_status_wire_format() {
    let query = UsernameQuery::parse("aotpy").unwrap();
    let result = ProbeResult::new(UsernameStatus::Taken, ProbeSource::Telegram, "Username is taken");

    let json = serde_json::to_value(ResolvedStatus::from_probe(&query, result)).unwrap();
    assert_eq!(
        json,
        json!({
            "username": "@aotpy",
            "status": "taken",
            "price": "N/A",
            "can_claim": false,
            "message": "Username is taken",
            "source": "telegram"
        })
    );
}

#[test]
fn test_resolved_status_deserialize() {
    let json = r#"{
        "username": "@obito",
        "status": "sold_on_fragment",
        "price": "3,448 Ton",
        "can_claim": false,
        "message": "Sold on Fragment",
        "source": "fragment"
    }"#;
    let resolved: ResolvedStatus = serde_json::from_str(json).unwrap();
    assert_eq!(resolved.status, UsernameStatus::SoldOnFragment);
    assert_eq!(resolved.price, Price::Ton("3,448".to_string()));
    assert_eq!(resolved.source, ProbeSource::Fragment);
}
