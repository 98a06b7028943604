use crate::core::config::{HostConfig, LOG_TAG};
use crate::core::logging::parse_level;
use android_logger::{AndroidLogger, Config};
use log::LevelFilter;
use sentry::integrations::log::{LogFilter, SentryLogger};

fn android_config(level: LevelFilter) -> Config {
    Config::default().with_max_level(level).with_tag(LOG_TAG)
}

/// Install the logger. With a sentry DSN configured, records are also shipped to sentry and
/// the returned guard must stay alive for as long as reporting should work.
pub fn init_logging(config: &HostConfig) -> Option<sentry::ClientInitGuard> {
    let level = parse_level(&config.log.level);

    if config.log.sentry_dsn.is_empty() {
        android_logger::init_once(android_config(level));
        return None;
    }

    let guard = sentry::init((
        config.log.sentry_dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            enable_logs: true,
            ..Default::default()
        },
    ));
    sentry::configure_scope(|scope| {
        scope.set_extra(
            "engine_host_config",
            serde_json::to_value(config).unwrap_or_default(),
        );
    });

    // Wrap the Android logger with Sentry's logger
    let logger = SentryLogger::with_dest(AndroidLogger::new(android_config(level))).filter(|md| {
        match md.level() {
            // Capture error records as Sentry events
            // These are grouped into issues, representing high-severity errors to act upon
            log::Level::Error => LogFilter::Event,
            // Ignore trace level records, as they're too verbose
            log::Level::Trace => LogFilter::Ignore,
            // Capture everything else as a log
            _ => LogFilter::Log,
        }
    });

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    } else {
        android_logger::init_once(android_config(level));
    }
    Some(guard)
}
