// ==========================================
// Abrazaderas - i18n
// ==========================================
// rust-i18n with Spanish (default) and English catalogs under locales/.
// The rust_i18n::i18n! macro is invoked in lib.rs.
// ==========================================

use std::sync::Once;

/// Environment variable that selects the message language at startup.
pub const LOCALE_ENV: &str = "ABRAZADERAS_LOCALE";

pub const DEFAULT_LOCALE: &str = "es";

const SUPPORTED_LOCALES: [&str; 2] = ["es", "en"];

// rust-i18n starts in "en"; the first lookup switches to Spanish unless a
// locale was chosen before.
static LOCALE_INIT: Once = Once::new();

fn ensure_default_locale() {
    LOCALE_INIT.call_once(|| rust_i18n::set_locale(DEFAULT_LOCALE));
}

pub fn current_locale() -> String {
    ensure_default_locale();
    rust_i18n::locale().to_string()
}

/// Switch the message language ("es" or "en"); unknown codes fall back to Spanish.
pub fn set_locale(locale: &str) {
    let locale = locale.trim().to_lowercase();
    let chosen = SUPPORTED_LOCALES
        .iter()
        .find(|l| locale == **l || locale.starts_with(&format!("{}-", l)))
        .copied()
        .unwrap_or(DEFAULT_LOCALE);
    LOCALE_INIT.call_once(|| {});
    rust_i18n::set_locale(chosen);
}

/// Apply `ABRAZADERAS_LOCALE`, or Spanish when it is unset.
pub fn init_from_env() {
    let locale = std::env::var(LOCALE_ENV).unwrap_or_else(|_| DEFAULT_LOCALE.to_string());
    set_locale(&locale);
}

/// Translate a message key.
///
/// # Example
/// ```no_run
/// use abrazaderas::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    ensure_default_locale();
    rust_i18n::t!(key).to_string()
}

/// Translate and fill `%{name}` placeholders.
///
/// # Example
/// ```no_run
/// use abrazaderas::i18n::t_with_args;
/// let msg = t_with_args("number.required", &[("field", "Ancho")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    ensure_default_locale();
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
