use std::time::Duration;

use log::LevelFilter;

use crate::idle::DEFAULT_IDLE_TIMEOUT;

// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 这些是默认值，部署时没有提供对应配置项就使用它们
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);
const DEFAULT_LIST_LIMIT: u32 = 1000;
const DEFAULT_ACTIVITY_LIMIT: u32 = 100;
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// 应用配置
///
/// 通过一个查找函数读取配置项，浏览器里查的是 `<meta>` 标签与编译期环境变量，
/// 测试里直接传闭包。读不到或解析失败的项使用默认值。
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 后端地址，不含 `/api/v1`
    pub api_base_url: String,
    /// 空闲多久后锁屏
    pub idle_timeout: Duration,
    /// 提示消息的显示时长
    pub toast_duration: Duration,
    /// 仪表盘一次拉取的交易条数上限
    pub list_limit: u32,
    /// 操作日志一次拉取的条数
    pub activity_limit: u32,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            api_base_url: lookup("API_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),

            // 0 会导致立即锁屏，视为未配置
            idle_timeout: number("IDLE_TIMEOUT_SECS")
                .filter(|&s| s > 0)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_IDLE_TIMEOUT),

            toast_duration: number("TOAST_DURATION_MS")
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TOAST_DURATION),

            list_limit: number("LIST_LIMIT")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(DEFAULT_LIST_LIMIT),

            activity_limit: number("ACTIVITY_LIMIT")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(DEFAULT_ACTIVITY_LIMIT),

            log_level: lookup("LOG_LEVEL")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.idle_timeout, Duration::from_secs(180));
        assert_eq!(config.toast_duration, Duration::from_secs(3));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("API_BASE_URL", "https://books.example.com/ "),
            ("IDLE_TIMEOUT_SECS", "0"),
            ("TOAST_DURATION_MS", "1500"),
            ("LIST_LIMIT", "not a number"),
            ("LOG_LEVEL", "debug"),
        ]);
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_base_url, "https://books.example.com");
        assert_eq!(config.idle_timeout, DEFAULT_IDLE_TIMEOUT);
        assert_eq!(config.toast_duration, Duration::from_millis(1500));
        assert_eq!(config.list_limit, 1000);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }
}
