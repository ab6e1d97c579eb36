use std::collections::HashMap;
use std::time::Duration;

use assessa_server::config::{JwtKey, ServerConfig};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn minimal_configuration_uses_defaults() {
    let config = ServerConfig::from_lookup(lookup(&[
        ("ASSESSA_BACKEND_URL", "http://localhost:3000"),
        ("ASSESSA_JWT_SECRET", "s3cret"),
    ]))
    .unwrap();

    assert_eq!(config.bind.to_string(), "0.0.0.0:8080");
    assert_eq!(config.backend_timeout, Duration::from_secs(10));
    assert!(matches!(config.jwt_key, JwtKey::Secret(ref s) if s == "s3cret"));
    assert!(config.identity.is_none());
    assert!(config.jwt_issuer.is_none());
}

#[test]
fn public_key_wins_over_secret() {
    let config = ServerConfig::from_lookup(lookup(&[
        ("ASSESSA_BACKEND_URL", "http://localhost:3000"),
        ("ASSESSA_JWT_PUBLIC_KEY", "-----BEGIN PUBLIC KEY-----"),
        ("ASSESSA_JWT_SECRET", "s3cret"),
        ("ASSESSA_BACKEND_TIMEOUT_SECS", "3"),
    ]))
    .unwrap();

    assert!(matches!(config.jwt_key, JwtKey::RsaPem(_)));
    assert_eq!(config.backend_timeout, Duration::from_secs(3));
}

#[test]
fn backend_url_is_required() {
    let err = ServerConfig::from_lookup(lookup(&[("ASSESSA_JWT_SECRET", "s3cret"), ("ASSESSA_BACKEND_URL", "  ")]))
        .unwrap_err();
    assert!(err.to_string().contains("ASSESSA_BACKEND_URL"));
}

#[test]
fn a_verification_key_is_required() {
    let err = ServerConfig::from_lookup(lookup(&[("ASSESSA_BACKEND_URL", "http://localhost:3000")])).unwrap_err();
    assert!(err.to_string().contains("ASSESSA_JWT_SECRET"));
}

#[test]
fn identity_settings_come_in_pairs() {
    let err = ServerConfig::from_lookup(lookup(&[
        ("ASSESSA_BACKEND_URL", "http://localhost:3000"),
        ("ASSESSA_JWT_SECRET", "s3cret"),
        ("ASSESSA_IDENTITY_API_URL", "https://api.identity.test"),
    ]))
    .unwrap_err();
    assert!(err.to_string().contains("must be set together"));

    let config = ServerConfig::from_lookup(lookup(&[
        ("ASSESSA_BACKEND_URL", "http://localhost:3000"),
        ("ASSESSA_JWT_SECRET", "s3cret"),
        ("ASSESSA_IDENTITY_API_URL", "https://api.identity.test"),
        ("ASSESSA_IDENTITY_SECRET_KEY", "sk_test"),
    ]))
    .unwrap();
    assert_eq!(config.identity.unwrap().secret_key, "sk_test");
}

#[test]
fn bad_bind_address_is_reported() {
    let err = ServerConfig::from_lookup(lookup(&[
        ("ASSESSA_BACKEND_URL", "http://localhost:3000"),
        ("ASSESSA_JWT_SECRET", "s3cret"),
        ("ASSESSA_BIND", "not-an-address"),
    ]))
    .unwrap_err();
    assert!(err.to_string().contains("ASSESSA_BIND"));
}
