use log::LevelFilter;

pub fn log_format(title: &str, content: &str) -> String {
    format!(
        "\n*** *** *** [{}] *** *** ***\n{}\n*** *** *** [{}] *** *** ***\n\n",
        title, content, title
    )
}

/// Like `expect`, but frames the message so it stands out in logcat.
/// Reserved for failures the host cannot start without.
pub trait HostExpectation<T> {
    fn host_expect(self, msg: &str) -> T;
}

impl<T, E> HostExpectation<T> for Result<T, E>
where
    E: std::fmt::Debug,
{
    fn host_expect(self, msg: &str) -> T {
        self.expect(&log_format("ENGINE HOST EXPECTATION", msg))
    }
}

impl<T> HostExpectation<T> for Option<T> {
    fn host_expect(self, msg: &str) -> T {
        self.expect(&log_format("ENGINE HOST EXPECTATION", msg))
    }
}

/// Verbose in debug builds, quieter in release.
pub fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    }
}

/// Resolve the configured level name, falling back to [`default_level`] when it is empty or unknown.
pub fn parse_level(name: &str) -> LevelFilter {
    if name.trim().is_empty() {
        return default_level();
    }
    name.trim().parse().unwrap_or_else(|_| default_level())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_the_title_on_both_sides() {
        let formatted = log_format("TITLE", "body");
        assert_eq!(formatted.matches("[TITLE]").count(), 2);
        assert!(formatted.contains("\nbody\n"));
    }

    #[test]
    fn parses_level_names_case_insensitively() {
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level(" DEBUG "), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
    }

    #[test]
    fn unknown_level_falls_back_to_default() {
        assert_eq!(parse_level("chatty"), default_level());
        assert_eq!(parse_level(""), default_level());
    }

    #[test]
    #[should_panic(expected = "ENGINE HOST EXPECTATION")]
    fn expectation_frames_the_panic_message() {
        let missing: Option<u8> = None;
        missing.host_expect("no value");
    }
}
