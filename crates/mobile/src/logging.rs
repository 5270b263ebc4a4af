use std::sync::Once;

use tracing_subscriber::{filter::FilterFn, layer::SubscriberExt, util::SubscriberInitExt};

pub fn setup_logging() {
    static LOGGING_SETUP: Once = Once::new();

    LOGGING_SETUP.call_once(|| {
        let filter =
            FilterFn::new(|en| en.module_path().unwrap_or_default().starts_with("coin_field"));

        #[cfg(target_os = "android")]
        let layer = {
            use tracing_logcat::{LogcatMakeWriter, LogcatTag};
            use tracing_subscriber::fmt::format::Format;

            let tag = LogcatTag::Fixed("CoinField-Rust".to_owned());
            let writer = match LogcatMakeWriter::new(tag) {
                Ok(writer) => writer,
                Err(error) => {
                    eprintln!("failed to initialize logcat writer: {error}");
                    return;
                }
            };

            tracing_subscriber::fmt::layer()
                .event_format(Format::default().with_level(false).without_time())
                .with_writer(writer)
                .with_ansi(false)
        };

        #[cfg(not(target_os = "android"))]
        let layer = tracing_subscriber::fmt::layer().with_target(true);

        // Another subscriber may already be installed by the host process.
        let _ = tracing_subscriber::registry()
            .with(layer)
            .with(filter)
            .try_init();
    })
}
