use core_config::env_or_default;

/// Default API location: the Items Service itself (point it at the gateway's
/// `/api` to go through the proxy)
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";

/// `--base-url` wins over `PANTRY_API_BASE_URL`, which wins over the default.
pub fn resolve_base_url(flag: Option<String>) -> String {
    flag.unwrap_or_else(|| env_or_default("PANTRY_API_BASE_URL", DEFAULT_BASE_URL))
}
