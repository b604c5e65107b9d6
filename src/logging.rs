// ==========================================
// Abrazaderas - logging setup
// ==========================================
// tracing + tracing-subscriber; output goes to stderr so that command
// results on stdout stay machine readable.
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// `json` switches to one JSON object per event.
pub const LOG_FORMAT_ENV: &str = "ABRAZADERAS_LOG_FORMAT";

/// Initialize the global subscriber.
///
/// # Environment
/// - RUST_LOG: filter (default: info), e.g. `RUST_LOG=abrazaderas=debug`
/// - ABRAZADERAS_LOG_FORMAT: `json` or anything else for plain text
///
/// # Example
/// ```no_run
/// use abrazaderas::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Verbose subscriber for tests; safe to call more than once.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
