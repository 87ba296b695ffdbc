//! Client configuration

use std::time::Duration;

/// 客户端配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | MATJIP_API_URL | http://localhost:8080 | API 地址 |
/// | MATJIP_HTTP_TIMEOUT_SECS | 30 | 普通请求超时(秒) |
/// | MATJIP_RESEND_TIMEOUT_MS | 5000 | 重发验证码超时(毫秒) |
/// | MATJIP_ALLOW_EARLY_RESEND | false | 倒计时未结束也允许重发 |
/// | MATJIP_LOG_LEVEL | info | 日志级别 |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "https://api.matjip.kr")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Upper bound for a single resend call; expiry counts as network failure
    pub resend_timeout: Duration,

    /// Open the resend gate before the countdown reaches zero
    pub allow_early_resend: bool,

    /// tracing filter directive
    pub log_level: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            resend_timeout: Duration::from_secs(5),
            allow_early_resend: false,
            log_level: "info".into(),
        }
    }

    /// 从环境变量加载配置，未设置时使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to defaults
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse().ok());

        Self {
            base_url: lookup("MATJIP_API_URL").unwrap_or(defaults.base_url),
            timeout: parsed("MATJIP_HTTP_TIMEOUT_SECS").unwrap_or(defaults.timeout),
            resend_timeout: parsed("MATJIP_RESEND_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.resend_timeout),
            allow_early_resend: lookup("MATJIP_ALLOW_EARLY_RESEND")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.allow_early_resend),
            log_level: lookup("MATJIP_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the resend timeout
    pub fn with_resend_timeout(mut self, timeout: Duration) -> Self {
        self.resend_timeout = timeout;
        self
    }

    pub fn with_early_resend(mut self, allow: bool) -> Self {
        self.allow_early_resend = allow;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.resend_timeout, Duration::from_secs(5));
        assert!(!config.allow_early_resend);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("https://api.matjip.kr")
            .with_timeout(10)
            .with_resend_timeout(Duration::from_millis(1500))
            .with_early_resend(true)
            .with_log_level("debug");
        assert_eq!(config.timeout, 10);
        assert_eq!(config.resend_timeout, Duration::from_millis(1500));
        assert!(config.allow_early_resend);
        assert_eq!(config.log_level, "debug");
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_parses_values() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("MATJIP_API_URL", "https://api.matjip.kr"),
            ("MATJIP_HTTP_TIMEOUT_SECS", "12"),
            ("MATJIP_RESEND_TIMEOUT_MS", "2500"),
            ("MATJIP_ALLOW_EARLY_RESEND", "true"),
            ("MATJIP_LOG_LEVEL", "debug"),
        ]));
        assert_eq!(config.base_url, "https://api.matjip.kr");
        assert_eq!(config.timeout, 12);
        assert_eq!(config.resend_timeout, Duration::from_millis(2500));
        assert!(config.allow_early_resend);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_from_lookup_falls_back_on_bad_values() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("MATJIP_HTTP_TIMEOUT_SECS", "thirty"),
            ("MATJIP_RESEND_TIMEOUT_MS", "-1"),
            ("MATJIP_ALLOW_EARLY_RESEND", "yes"),
        ]));
        let defaults = ClientConfig::default();
        assert_eq!(config.base_url, defaults.base_url);
        assert_eq!(config.timeout, 30);
        assert_eq!(config.resend_timeout, Duration::from_secs(5));
        assert!(!config.allow_early_resend);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_from_env() {
        // SAFETY: no other test in this crate reads these variables
        unsafe {
            std::env::set_var("MATJIP_RESEND_TIMEOUT_MS", "1500");
            std::env::set_var("MATJIP_ALLOW_EARLY_RESEND", "true");
            std::env::set_var("MATJIP_HTTP_TIMEOUT_SECS", "not-a-number");
        }
        let config = ClientConfig::from_env();
        unsafe {
            std::env::remove_var("MATJIP_RESEND_TIMEOUT_MS");
            std::env::remove_var("MATJIP_ALLOW_EARLY_RESEND");
            std::env::remove_var("MATJIP_HTTP_TIMEOUT_SECS");
        }

        assert_eq!(config.resend_timeout, Duration::from_millis(1500));
        assert!(config.allow_early_resend);
        assert_eq!(config.timeout, 30);
    }
}
