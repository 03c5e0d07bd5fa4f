//! 后端 JSON 的宽松反序列化辅助
//!
//! 后端对时间戳和金额的序列化并不统一：
//! - 时间戳可能带时区 (`2024-01-01T10:00:00+00:00`)，也可能是裸时间 (`2024-01-01T10:00:00.123456`)
//! - `Decimal` 字段会被序列化成字符串 (`"10.00"`)，`float` 字段则是数字

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn parse_number<E: Error>(raw: NumberOrString) -> Result<f64, E> {
    match raw {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| E::custom(format!("invalid number: {s}"))),
    }
}

/// 数字或数字字符串 -> `f64`
pub fn number<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    parse_number(NumberOrString::deserialize(de)?)
}

/// 可选的数字或数字字符串 -> `Option<f64>`
pub fn optional_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    match Option::<NumberOrString>::deserialize(de)? {
        Some(raw) => parse_number(raw).map(Some),
        None => Ok(None),
    }
}

/// 解析时间戳字符串，时区信息会被归一化到 UTC 后丢弃
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    s.parse::<NaiveDateTime>().ok()
}

pub fn timestamp<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDateTime, D::Error> {
    let s = String::deserialize(de)?;
    parse_timestamp(&s).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {s}")))
}

pub fn optional_timestamp<'de, D: Deserializer<'de>>(
    de: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    match Option::<String>::deserialize(de)? {
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {s}"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "number")]
        qty: f64,
        #[serde(default, deserialize_with = "optional_number")]
        cost: Option<f64>,
        #[serde(deserialize_with = "timestamp")]
        at: NaiveDateTime,
    }

    #[test]
    fn test_decimal_string_and_naive_timestamp() {
        let row: Row = serde_json::from_str(
            r#"{"qty": "12.50", "cost": 3, "at": "2024-03-01T08:30:00.123456"}"#,
        )
        .unwrap();
        assert_eq!(row.qty, 12.5);
        assert_eq!(row.cost, Some(3.0));
        assert_eq!(row.at.format("%Y-%m-%d %H:%M").to_string(), "2024-03-01 08:30");
    }

    #[test]
    fn test_rfc3339_is_normalized_to_utc() {
        let ts = parse_timestamp("2024-03-01T10:00:00+02:00").unwrap();
        assert_eq!(ts.format("%H:%M").to_string(), "08:00");
    }

    #[test]
    fn test_missing_optional_number() {
        let row: Row =
            serde_json::from_str(r#"{"qty": 1, "at": "2024-03-01T00:00:00"}"#).unwrap();
        assert_eq!(row.cost, None);
    }
}
