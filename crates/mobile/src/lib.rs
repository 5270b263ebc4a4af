pub mod logging;
pub mod session;
pub mod surface;
pub mod types;

uniffi::setup_scaffolding!();

/// Initialize the library with proper panic handling
/// Call this once at startup from Kotlin/Swift
#[uniffi::export]
pub fn init_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        tracing::error!("=== RUST PANIC ===");
        tracing::error!("{panic_info}");
        tracing::error!("Backtrace:\n{backtrace}");
        tracing::error!("=== END PANIC ===");
    }));
}

/// Route `tracing` output to the platform log. Safe to call repeatedly.
#[uniffi::export]
pub fn init_logging() {
    logging::setup_logging();
}

#[uniffi::export]
pub fn default_config() -> types::GameConfig {
    types::GameConfig::default()
}
