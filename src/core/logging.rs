//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
///
/// # Example
/// ```no_run
/// voxedit::core::logging::init();
/// log::info!("Editor started");
/// ```
pub fn init() {
    init_with_filter("info");
}

/// Initialize logging with an explicit default filter (RUST_LOG still wins).
///
/// Calling this more than once keeps the first logger; the binary and each
/// test may call it.
pub fn init_with_filter(filter: &str) {
    if let Err(e) = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter)
    ).try_init() {
        log::debug!("Logger already initialized: {}", e);
    }
}
