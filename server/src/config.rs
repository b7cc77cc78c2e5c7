use std::time::Duration;

/// Checked in order; the first non-empty value wins.
pub const SNAPSHOT_URL_VARS: [&str; 2] = ["SNAPSHOT_URL", "GAS_URL"];
pub const CACHE_BUST_PARAM: &str = "cacheBust";

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 3;

/// Snapshot endpoint without a trailing slash, or `None` when not configured.
pub fn snapshot_endpoint() -> Option<String> {
    SNAPSHOT_URL_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().trim_end_matches('/').to_owned())
        .find(|value| !value.is_empty())
}

pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

/// Periodic reload interval. Unset or zero disables refreshing after the first load.
pub fn refresh_interval() -> Option<Duration> {
    std::env::var("REFRESH_INTERVAL_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
}

pub fn upstream_http_timeout() -> Duration {
    std::env::var("UPSTREAM_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS))
}

pub fn upstream_connect_timeout() -> Duration {
    std::env::var("UPSTREAM_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{
        DEFAULT_SERVER_PORT, refresh_interval, server_port, snapshot_endpoint,
        upstream_http_timeout,
    };

    #[test]
    fn endpoint_absent_when_unset_or_blank() {
        temp_env::with_vars([("SNAPSHOT_URL", None::<&str>), ("GAS_URL", None)], || {
            assert_eq!(snapshot_endpoint(), None);
        });
        temp_env::with_vars([("SNAPSHOT_URL", Some("   ")), ("GAS_URL", None)], || {
            assert_eq!(snapshot_endpoint(), None);
        });
    }

    #[test]
    fn endpoint_is_trimmed_and_loses_trailing_slash() {
        temp_env::with_vars(
            [
                ("SNAPSHOT_URL", Some(" https://example.test/exec/ ")),
                ("GAS_URL", None),
            ],
            || {
                assert_eq!(
                    snapshot_endpoint().as_deref(),
                    Some("https://example.test/exec")
                );
            },
        );
    }

    #[test]
    fn gas_url_is_the_fallback() {
        temp_env::with_vars(
            [
                ("SNAPSHOT_URL", Some("")),
                ("GAS_URL", Some("https://script.example.test/macros/s/abc/exec")),
            ],
            || {
                assert_eq!(
                    snapshot_endpoint().as_deref(),
                    Some("https://script.example.test/macros/s/abc/exec")
                );
            },
        );
    }

    #[test]
    fn numeric_settings_fall_back_on_garbage() {
        temp_env::with_vars(
            [
                ("PORT", Some("eighty")),
                ("REFRESH_INTERVAL_SECS", Some("0")),
                ("UPSTREAM_HTTP_TIMEOUT_SECS", Some("-1")),
            ],
            || {
                assert_eq!(server_port(), DEFAULT_SERVER_PORT);
                assert_eq!(refresh_interval(), None);
                assert_eq!(upstream_http_timeout(), Duration::from_secs(10));
            },
        );
    }

    #[test]
    fn refresh_interval_reads_seconds() {
        temp_env::with_var("REFRESH_INTERVAL_SECS", Some("300"), || {
            assert_eq!(refresh_interval(), Some(Duration::from_secs(300)));
        });
    }
}
