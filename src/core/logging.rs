//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g.
/// `RUST_LOG=volray::raycast=trace` to see every dropped ray.
///
/// # Example
/// ```
/// volray::core::logging::init();
/// log::info!("Ray cache ready");
/// ```
pub fn init() {
    // try_init: hosts and doctests may already have installed a logger
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init();
}
