// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use balance_dashboard_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_settings() {
        let err = CoreError::InvalidSettings("term is zero".into());
        assert_eq!(err.to_string(), "Invalid settings: term is zero");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("boom".into());
        assert_eq!(err.to_string(), "Serialization error: boom");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("eof".into());
        assert_eq!(err.to_string(), "Deserialization error: eof");
    }

    #[test]
    fn report() {
        let err = CoreError::Report("net worth is not finite (NaN)".into());
        assert_eq!(
            err.to_string(),
            "Report generation failed: net worth is not finite (NaN)"
        );
    }

    #[test]
    fn item_not_found() {
        let err = CoreError::ItemNotFound("Assets/asset-9".into());
        assert_eq!(err.to_string(), "Line item not found: Assets/asset-9");
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Duplicate id".into());
        assert_eq!(err.to_string(), "Validation failed: Duplicate id");
    }

    #[test]
    fn empty_message() {
        let err = CoreError::ItemNotFound(String::new());
        assert_eq!(err.to_string(), "Line item not found: ");
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_fmt_error() {
        let err: CoreError = std::fmt::Error.into();
        assert!(matches!(err, CoreError::Report(_)));
    }

    #[test]
    fn question_mark_propagates_json_error() {
        fn parse() -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str("nope")?)
        }
        assert!(matches!(parse(), Err(CoreError::Deserialization(_))));
    }
}

// ── Trait bounds ────────────────────────────────────────────────────

mod traits {
    use super::*;

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&CoreError::Report("x".into()));
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }
}
