//! 金额与日期的显示格式

use chrono::{NaiveDate, NaiveDateTime};

/// 千分位、两位小数，如 `USD 1,234.50`、`-USD 20.00`
pub fn money(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{currency} {grouped}.{:02}", cents % 100)
}

/// 紧凑金额，用于图表坐标轴
pub fn compact(amount: f64) -> String {
    let abs = amount.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", amount / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", amount / 1_000.0)
    } else {
        format!("{amount:.0}")
    }
}

pub fn date(d: NaiveDate) -> String {
    d.format("%b %d, %Y").to_string()
}

pub fn date_time(dt: NaiveDateTime) -> String {
    dt.format("%b %d, %Y %H:%M").to_string()
}

/// 浏览器本地时区的今天；frontend 的 chrono 不带时钟
pub fn today() -> Option<NaiveDate> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
}

pub fn percent(rate: f64) -> String {
    format!("{rate:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(1234.5, "USD"), "USD 1,234.50");
        assert_eq!(money(0.0, "EUR"), "EUR 0.00");
        assert_eq!(money(-20.0, "USD"), "-USD 20.00");
        assert_eq!(money(1_000_000.0, "BDT"), "BDT 1,000,000.00");
        assert_eq!(money(999.999, "USD"), "USD 1,000.00");
    }

    #[test]
    fn test_compact_and_dates() {
        assert_eq!(compact(1500.0), "1.5k");
        assert_eq!(compact(2_500_000.0), "2.5M");
        assert_eq!(compact(42.0), "42");
        let d = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        assert_eq!(date(d), "Feb 10, 2024");
        assert_eq!(percent(7.5), "7.50%");
    }
}
