// ==========================================
// Default message language
// ==========================================
// Runs in its own process so no other test has touched the locale.
// ==========================================

use abrazaderas::i18n::{current_locale, DEFAULT_LOCALE};
use abrazaderas::{ClampError, ClampQuoter, QuoteRequest};

#[test]
fn test_library_messages_default_to_spanish() {
    let request = QuoteRequest {
        clamp_type: Some("laminada".to_string()),
        diameter: "1/2".to_string(),
        dollar_rate: "1000".to_string(),
        steel_price_usd: "1".to_string(),
        width_mm: "100".to_string(),
        length_mm: "200".to_string(),
        ..Default::default()
    };
    let err = ClampQuoter::default().calculate(&request).unwrap_err();
    assert!(matches!(err, ClampError::LaminatedDiameterNotAllowed { .. }));
    assert!(
        err.to_string().starts_with("La abrazadera laminada solo admite diametros"),
        "{err}"
    );
    assert_eq!(current_locale(), DEFAULT_LOCALE);
}
