use guardian_domain::Config;
use tracing_subscriber::EnvFilter;

pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt().with_target(true).with_env_filter(filter);

    if config.logging.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!(level = %config.logging.level, format = %config.logging.format, "logging initialized");
}
