//! Tracing subscriber setup for the `uel` binary.
//!
//! Logs go to stderr so report output on stdout stays clean. The filter is,
//! in order of precedence: `-v`/`-vv` on the command line, then the
//! configured filter directives, then `warn`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Filter directives for a verbosity count and optional configured filter.
pub fn filter_directives(verbosity: u8, configured: Option<&str>) -> String {
    match verbosity {
        0 => configured.unwrap_or(DEFAULT_FILTER).to_string(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Install the global subscriber. Calling this twice is harmless.
pub fn init(verbosity: u8, configured: Option<&str>) {
    let directives = filter_directives(verbosity, configured);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_configured_filter() {
        assert_eq!(filter_directives(0, None), "warn");
        assert_eq!(filter_directives(0, Some("uelectoral=debug")), "uelectoral=debug");
        assert_eq!(filter_directives(1, Some("error")), "info");
        assert_eq!(filter_directives(3, None), "debug");
    }
}
