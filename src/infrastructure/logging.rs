// Tracing subscriber setup
use crate::infrastructure::config::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured level when set
pub fn init_tracing(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if settings.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
