//! Integration tests for the YAML credential store

mod common;

use crate::common::setup_credentials;

use ::common::prelude::{authenticate, CredentialError, CredentialStore};

#[tokio::test]
async fn test_missing_file_is_empty() {
    let (store, _temp) = setup_credentials();
    assert!(store.load().await.unwrap().is_empty());
    assert!(!store.verify("admin", "secret").await.unwrap());
}

#[tokio::test]
async fn test_register_then_verify() {
    let (store, _temp) = setup_credentials();

    store.register("ann", "pw12").await.unwrap();

    assert!(store.verify("ann", "pw12").await.unwrap());
    assert!(!store.verify("ann", "wrong").await.unwrap());
    assert!(!store.verify("nosuch", "anything").await.unwrap());
    assert!(store.contains("ann").await.unwrap());
    assert!(!store.contains("Ann").await.unwrap());
}

#[tokio::test]
async fn test_password_is_never_stored_in_plaintext() {
    let (store, _temp) = setup_credentials();
    store.register("admin", "secret").await.unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.starts_with("admin: "));
    assert!(!raw.contains("secret"));
}

#[tokio::test]
async fn test_register_appends() {
    let (store, _temp) = setup_credentials();
    // a hand-written file without a trailing newline
    std::fs::write(store.path(), "# users\nlegacy: not-a-hash").unwrap();

    store.register("admin", "secret").await.unwrap();
    store.register("editor", "hunter22").await.unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.starts_with("# users\nlegacy: not-a-hash\n"));

    let credentials = store.load().await.unwrap();
    assert_eq!(
        credentials.keys().collect::<Vec<_>>(),
        vec!["admin", "editor", "legacy"]
    );

    assert!(authenticate(&store, "admin", "secret").await.unwrap());
    assert!(authenticate(&store, "editor", "hunter22").await.unwrap());
    // an unparseable stored hash simply never matches
    assert!(!authenticate(&store, "legacy", "not-a-hash").await.unwrap());
}

#[tokio::test]
async fn test_malformed_file() {
    let (store, _temp) = setup_credentials();
    std::fs::write(store.path(), "- just\n- a list\n").unwrap();

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, CredentialError::Yaml(_)));
}
