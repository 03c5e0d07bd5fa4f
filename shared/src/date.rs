//! 日历月份工具
//!
//! 财年按自然月切分，聚合时使用 `(year, month)` 作为分桶键。

use chrono::{Datelike, NaiveDate};
use std::fmt::Display;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 日历月份键
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl MonthKey {
    #[inline]
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// 取日期所在的月份
    #[inline]
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// 向后偏移 `n` 个月
    pub fn add_months(self, n: u32) -> Self {
        let zero_based = self.month - 1 + n;
        Self::new(self.year + (zero_based / 12) as i32, zero_based % 12 + 1)
    }

    /// 从 `start` 开始的连续 `count` 个月
    pub fn range(start: MonthKey, count: u32) -> impl Iterator<Item = MonthKey> {
        (0..count).map(move |i| start.add_months(i))
    }

    /// 月份缩写，如 `Feb`
    pub fn short_name(&self) -> &'static str {
        MONTH_ABBR[(self.month as usize - 1) % 12]
    }

    /// 图表标签，如 `Feb 2024`
    pub fn label(&self) -> String {
        format!("{} {}", self.short_name(), self.year)
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// 解析后端的 `YYYY-MM-DD` 日期
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_months_wraps_year() {
        let start = MonthKey::new(2024, 7);
        assert_eq!(start.add_months(5), MonthKey::new(2024, 12));
        assert_eq!(start.add_months(6), MonthKey::new(2025, 1));
        assert_eq!(start.add_months(11), MonthKey::new(2025, 6));
    }

    #[test]
    fn test_range_is_chronological() {
        let months: Vec<_> = MonthKey::range(MonthKey::new(2023, 11), 3).collect();
        assert_eq!(
            months,
            vec![
                MonthKey::new(2023, 11),
                MonthKey::new(2023, 12),
                MonthKey::new(2024, 1)
            ]
        );
    }

    #[test]
    fn test_labels() {
        let key = MonthKey::new(2024, 2);
        assert_eq!(key.label(), "Feb 2024");
        assert_eq!(key.to_string(), "2024-02");
        assert_eq!(parse_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date("29/02/2024"), None);
    }
}
