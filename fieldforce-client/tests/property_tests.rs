//! Property tests for the pure pieces of the SDK.

use fieldforce_client::{admin_password, ClientConfig, CredentialStore};
use fieldforce_core::{classify, ApiFailure, ProbeOutcome, ServerStatus};
use proptest::prelude::*;

fn base_config() -> ClientConfig {
    ClientConfig {
        api_base_url: "http://localhost:3000/api".to_string(),
        health_url: "http://localhost:3000/".to_string(),
        credential_dir: "tmp/fieldforce".into(),
        probe_timeout_ms: 8_000,
        probe_interval_ms: 8_000,
        request_timeout_ms: None,
    }
}

proptest! {
    #[test]
    fn logout_is_signalled_only_for_401(code in 100u16..600) {
        let action = classify(&ApiFailure::status(code));
        prop_assert_eq!(action.logout, code == 401);
        if action.logout {
            prop_assert!(!action.show_retry);
        }
    }

    #[test]
    fn support_is_signalled_only_for_500(code in 100u16..600) {
        let action = classify(&ApiFailure::status(code));
        prop_assert_eq!(action.show_support, code == 500);
    }

    #[test]
    fn every_classification_carries_a_message(code in 100u16..600) {
        let action = classify(&ApiFailure::status(code));
        prop_assert!(!action.message.is_empty());
    }

    #[test]
    fn probe_transition_is_total(status in 100u16..600) {
        let next = ServerStatus::after_probe(ProbeOutcome::Responded { status });
        prop_assert!(next == ServerStatus::Online || next == ServerStatus::Offline);
        prop_assert_eq!(next == ServerStatus::Online, (200..300).contains(&status));
    }

    #[test]
    fn store_round_trips_arbitrary_values(value in "[a-zA-Z0-9 @._:/-]{0,64}") {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path());
        store.set("token", &value).unwrap();
        prop_assert_eq!(store.get("token").unwrap(), Some(value));
    }

    #[test]
    fn admin_suffix_is_always_stripped(head in "[a-zA-Z0-9]{0,16}") {
        let password = format!("{}@admin", head);
        prop_assert_eq!(admin_password(&password).unwrap(), head);
    }

    #[test]
    fn passwords_without_suffix_never_pass(password in "[a-zA-Z0-9]{1,16}") {
        prop_assert!(admin_password(&password).is_err());
    }

    #[test]
    fn probe_config_must_be_positive(timeout in 1u64..60_000, interval in 1u64..60_000) {
        let mut config = base_config();
        config.probe_timeout_ms = timeout;
        config.probe_interval_ms = interval;
        prop_assert!(config.validate().is_ok());
    }
}
