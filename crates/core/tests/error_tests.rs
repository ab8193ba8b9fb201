// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use std::str::FromStr;
use uuid::Uuid;

use finance_visualiser_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("Amount is required".into());
        assert_eq!(err.to_string(), "Validation failed: Amount is required");
    }

    #[test]
    fn auth() {
        let err = CoreError::Auth("Invalid login credentials".into());
        assert_eq!(err.to_string(), "Authentication failed: Invalid login credentials");
    }

    #[test]
    fn unauthenticated() {
        assert_eq!(CoreError::Unauthenticated.to_string(), "Not signed in");
    }

    #[test]
    fn persistence() {
        let err = CoreError::Persistence("Finance update failed: timeout".into());
        assert_eq!(err.to_string(), "Persistence error: Finance update failed: timeout");
    }

    #[test]
    fn snapshot_not_found() {
        let err = CoreError::SnapshotNotFound(Uuid::nil());
        assert_eq!(
            err.to_string(),
            "No finance information found for user 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn snapshot_stale() {
        let err = CoreError::SnapshotStale {
            transaction_id: Uuid::nil(),
            reason: "timeout".into(),
        };
        assert_eq!(
            err.to_string(),
            "Transaction 00000000-0000-0000-0000-000000000000 was recorded but finance totals were not updated: timeout"
        );
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            service: "Supabase REST".into(),
            message: "bad row".into(),
        };
        assert_eq!(err.to_string(), "API error (Supabase REST): bad row");
    }

    #[test]
    fn network_config_and_encoding() {
        assert_eq!(CoreError::Network("reset".into()).to_string(), "Network error: reset");
        assert_eq!(CoreError::Config("missing".into()).to_string(), "Configuration error: missing");
        assert_eq!(CoreError::Serialization("x".into()).to_string(), "Serialization error: x");
        assert_eq!(CoreError::Deserialization("y".into()).to_string(), "Deserialization error: y");
    }
}

// ── Classification ──────────────────────────────────────────────────

mod classification {
    use super::*;

    #[test]
    fn user_errors() {
        assert!(CoreError::ValidationError(String::new()).is_user_error());
        assert!(CoreError::Auth(String::new()).is_user_error());
        assert!(CoreError::Unauthenticated.is_user_error());
    }

    #[test]
    fn system_errors() {
        assert!(!CoreError::Persistence(String::new()).is_user_error());
        assert!(!CoreError::Network(String::new()).is_user_error());
        assert!(!CoreError::SnapshotNotFound(Uuid::nil()).is_user_error());
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json() {
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(CoreError::from(e), CoreError::Deserialization(_)));
    }

    #[test]
    fn from_decimal() {
        let e = rust_decimal::Decimal::from_str("abc").unwrap_err();
        assert!(matches!(CoreError::from(e), CoreError::ValidationError(_)));
    }

    #[test]
    fn question_mark_propagation() {
        fn parse(json: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(json)?)
        }
        assert!(parse("[]").is_ok());
        assert!(parse("nope").is_err());
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }
}
