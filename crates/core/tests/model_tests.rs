use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use uuid::Uuid;

use finance_visualiser_core::errors::CoreError;
use finance_visualiser_core::models::chart::DerivedPoint;
use finance_visualiser_core::models::finance::{FinanceSnapshot, SnapshotPatch};
use finance_visualiser_core::models::session::{Session, User};
use finance_visualiser_core::models::settings::{
    Settings, DEFAULT_TIMEOUT_SECS, ENV_CURRENCY_SYMBOL, ENV_REQUEST_TIMEOUT_SECS,
    ENV_SUPABASE_ANON_KEY, ENV_SUPABASE_URL,
};
use finance_visualiser_core::models::transaction::{TransactionCategory, TransactionEntry};
use finance_visualiser_core::models::view::View;

// ═══════════════════════════════════════════════════════════════════
//  TransactionCategory
// ═══════════════════════════════════════════════════════════════════

mod transaction_category {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(TransactionCategory::Savings.to_string(), "Savings");
        assert_eq!(TransactionCategory::Expenditure.to_string(), "Expenditure");
    }

    #[test]
    fn default_is_savings() {
        assert_eq!(TransactionCategory::default(), TransactionCategory::Savings);
    }

    #[test]
    fn parses_form_values() {
        assert_eq!("Savings".parse::<TransactionCategory>().unwrap(), TransactionCategory::Savings);
        assert_eq!(
            " Expenditure ".parse::<TransactionCategory>().unwrap(),
            TransactionCategory::Expenditure
        );
        assert!(matches!(
            "Income".parse::<TransactionCategory>().unwrap_err(),
            CoreError::ValidationError(_)
        ));
    }

    #[test]
    fn serializes_as_stored_strings() {
        assert_eq!(serde_json::to_string(&TransactionCategory::Savings).unwrap(), "\"Savings\"");
        assert_eq!(
            serde_json::to_string(&TransactionCategory::Expenditure).unwrap(),
            "\"Expenditure\""
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  TransactionEntry
// ═══════════════════════════════════════════════════════════════════

mod transaction_entry {
    use super::*;

    #[test]
    fn new_assigns_unique_ids() {
        let date = Utc::now();
        let a = TransactionEntry::new(Uuid::nil(), "a", dec!(1), TransactionCategory::Savings, date);
        let b = TransactionEntry::new(Uuid::nil(), "b", dec!(1), TransactionCategory::Savings, date);
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.get_version_num(), 7);
    }

    #[test]
    fn deserializes_backend_row() {
        let json = r#"{
            "id": "0190c0de-0000-7000-8000-000000000001",
            "user_id": "0190c0de-0000-7000-8000-0000000000ff",
            "description": "Sold bike",
            "amount": 120.5,
            "category": "Savings",
            "date": "2025-01-15T10:30:00+00:00"
        }"#;
        let entry: TransactionEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.description, "Sold bike");
        assert_eq!(entry.amount, dec!(120.5));
        assert_eq!(entry.category, TransactionCategory::Savings);
        assert_eq!(entry.date, Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn rejects_unknown_category() {
        let json = r#"{
            "id": "0190c0de-0000-7000-8000-000000000001",
            "user_id": "0190c0de-0000-7000-8000-0000000000ff",
            "description": "x",
            "amount": 1,
            "category": "Income",
            "date": "2025-01-15T10:30:00Z"
        }"#;
        assert!(serde_json::from_str::<TransactionEntry>(json).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FinanceSnapshot / SnapshotPatch
// ═══════════════════════════════════════════════════════════════════

mod finance_snapshot {
    use super::*;

    #[test]
    fn total_money_is_income_plus_savings() {
        let s = FinanceSnapshot::new(dec!(1000), dec!(200), dec!(300));
        assert_eq!(s.total_money(), dec!(1300));
    }

    #[test]
    fn deserializes_row_with_extra_columns() {
        let json = r#"{ "user_id": "abc", "income": 2500, "expenditures": 1200.75, "savings": 0 }"#;
        let s: FinanceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(s, FinanceSnapshot::new(dec!(2500), dec!(1200.75), dec!(0)));
    }

    #[test]
    fn missing_columns_default_to_zero() {
        let s: FinanceSnapshot = serde_json::from_str(r#"{ "income": 10 }"#).unwrap();
        assert_eq!(s.expenditures, dec!(0));
        assert_eq!(s.savings, dec!(0));
    }

    #[test]
    fn null_columns_read_as_zero() {
        let json = r#"{"income":1000,"expenditures":200,"savings":null}"#;
        let s: FinanceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(s, FinanceSnapshot::new(dec!(1000), dec!(200), dec!(0)));

        let all_null = r#"{"income":null,"expenditures":null,"savings":null}"#;
        let s: FinanceSnapshot = serde_json::from_str(all_null).unwrap();
        assert_eq!(s, FinanceSnapshot::default());
    }

    #[test]
    fn increment_out_of_range_is_an_error() {
        let s = FinanceSnapshot::new(dec!(0), dec!(1), dec!(1));
        for category in [TransactionCategory::Savings, TransactionCategory::Expenditure] {
            let err = SnapshotPatch::increment(&s, category, Decimal::MAX).unwrap_err();
            assert!(matches!(err, CoreError::ValidationError(_)), "{category}: {err:?}");
        }
    }

    #[test]
    fn total_money_saturates() {
        let s = FinanceSnapshot::new(Decimal::MAX, dec!(0), dec!(1));
        assert_eq!(s.total_money(), Decimal::MAX);
    }

    #[test]
    fn increment_touches_one_bucket() {
        let s = FinanceSnapshot::new(dec!(1000), dec!(200), dec!(300));

        let savings = SnapshotPatch::increment(&s, TransactionCategory::Savings, dec!(50)).unwrap();
        assert_eq!(savings.savings, Some(dec!(350)));
        assert!(savings.income.is_none() && savings.expenditures.is_none());

        let spent = SnapshotPatch::increment(&s, TransactionCategory::Expenditure, dec!(30)).unwrap();
        assert_eq!(spent.expenditures, Some(dec!(230)));
        assert!(spent.income.is_none() && spent.savings.is_none());
    }

    #[test]
    fn apply_keeps_absent_fields() {
        let mut s = FinanceSnapshot::new(dec!(1000), dec!(200), dec!(300));
        s.apply(&SnapshotPatch {
            savings: Some(dec!(1)),
            ..SnapshotPatch::default()
        });
        assert_eq!(s, FinanceSnapshot::new(dec!(1000), dec!(200), dec!(1)));
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = SnapshotPatch {
            expenditures: Some(dec!(230)),
            ..SnapshotPatch::default()
        };
        let value = serde_json::to_value(patch).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["expenditures"]);
        assert!(SnapshotPatch::default().is_empty());
        assert!(!patch.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DerivedPoint / Session
// ═══════════════════════════════════════════════════════════════════

mod derived_point {
    use super::*;

    #[test]
    fn serializes_with_chart_field_names() {
        let p = DerivedPoint {
            date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            total_money: dec!(1300),
            expenditures: dec!(200),
        };
        let value = serde_json::to_value(&p).unwrap();
        assert!(value.get("totalMoney").is_some());
        assert!(value.get("expenditures").is_some());
        assert!(value.get("date").is_some());
        assert!(value.get("total_money").is_none());
    }
}

mod session {
    use super::*;

    fn session(expires_at: Option<chrono::DateTime<Utc>>) -> Session {
        Session {
            access_token: "t".into(),
            refresh_token: None,
            expires_at,
            user: User {
                id: Uuid::nil(),
                email: None,
            },
        }
    }

    #[test]
    fn expiry() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        assert!(!session(None).is_expired(now));
        assert!(session(Some(now)).is_expired(now));
        assert!(!session(Some(now + chrono::Duration::minutes(5))).is_expired(now));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(s.currency_symbol, "£");
    }

    #[test]
    fn loads_required_and_optional_values() {
        let s = Settings::from_lookup(lookup(&[
            (ENV_SUPABASE_URL, "https://abc.supabase.co/"),
            (ENV_SUPABASE_ANON_KEY, " anon "),
            (ENV_REQUEST_TIMEOUT_SECS, "10"),
            (ENV_CURRENCY_SYMBOL, "€"),
        ]))
        .unwrap();
        assert_eq!(s.backend_url, "https://abc.supabase.co");
        assert_eq!(s.anon_key, "anon");
        assert_eq!(s.request_timeout_secs, 10);
        assert_eq!(s.currency_symbol, "€");
    }

    #[test]
    fn optional_values_fall_back() {
        let s = Settings::from_lookup(lookup(&[
            (ENV_SUPABASE_URL, "http://localhost:54321"),
            (ENV_SUPABASE_ANON_KEY, "anon"),
        ]))
        .unwrap();
        assert_eq!(s.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(s.currency_symbol, "£");
    }

    #[test]
    fn missing_or_bad_values_are_config_errors() {
        let cases: Vec<Vec<(&str, &str)>> = vec![
            vec![(ENV_SUPABASE_ANON_KEY, "anon")],
            vec![(ENV_SUPABASE_URL, "https://abc.supabase.co")],
            vec![(ENV_SUPABASE_URL, "abc.supabase.co"), (ENV_SUPABASE_ANON_KEY, "anon")],
            vec![
                (ENV_SUPABASE_URL, "https://abc.supabase.co"),
                (ENV_SUPABASE_ANON_KEY, "anon"),
                (ENV_REQUEST_TIMEOUT_SECS, "0"),
            ],
            vec![
                (ENV_SUPABASE_URL, "https://abc.supabase.co"),
                (ENV_SUPABASE_ANON_KEY, "anon"),
                (ENV_REQUEST_TIMEOUT_SECS, "soon"),
            ],
        ];
        for pairs in cases {
            let err = Settings::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(matches!(err, CoreError::Config(_)), "{pairs:?} -> {err:?}");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  View
// ═══════════════════════════════════════════════════════════════════

mod view {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for v in View::ALL {
            assert_eq!(View::from_path(v.path()), Some(v));
        }
    }

    #[test]
    fn from_path_ignores_query_and_trailing_slash() {
        assert_eq!(View::from_path("/auth/Confirm?code=abc"), Some(View::ConfirmEmail));
        assert_eq!(View::from_path("/dashboard/"), Some(View::Dashboard));
        assert_eq!(View::from_path("/"), Some(View::Home));
        assert_eq!(View::from_path("/nope"), None);
    }

    #[test]
    fn only_dashboard_and_setup_are_private() {
        let private: Vec<View> = View::ALL.into_iter().filter(|v| v.is_private()).collect();
        assert_eq!(private, vec![View::Dashboard, View::FinanceSetup]);
    }
}
