use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{self, Deserialize, Deserializer, Serializer, de::Error};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const BAR_WIDTH: usize = 20;

/// Serialize Option<String> as empty string when None
pub fn serialize_option_string<S>(option: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match option {
        Some(value) => serializer.serialize_str(value),
        None => serializer.serialize_str(""),
    }
}

/// Deserialize empty string as None
pub fn deserialize_option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.is_empty() { Ok(None) } else { Ok(Some(s)) }
}

pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format(FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if let Ok(naive_dt) = NaiveDateTime::parse_from_str(&s, FORMAT) {
        Ok(naive_dt.and_utc())
    } else {
        // Hosted rows come back as RFC 3339
        s.parse::<DateTime<Utc>>().map_err(Error::custom)
    }
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(FORMAT).to_string()
}

/// Format an amount in currency units, e.g. `$24.00`
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Render a percentage as a fixed-width bar, e.g. `██████░░░░`
pub fn percentage_bar(percentage: u8) -> String {
    let filled = (usize::from(percentage.min(100)) * BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Truncate to `max` characters, appending `...` when shortened
pub fn truncate_string(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let truncated: String = s.chars().take(keep).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(24.0), "$24.00");
        assert_eq!(format_price(19.999), "$20.00");
    }

    #[test]
    fn test_percentage_bar_bounds() {
        assert_eq!(percentage_bar(0), "░".repeat(BAR_WIDTH));
        assert_eq!(percentage_bar(100), "█".repeat(BAR_WIDTH));
        assert_eq!(percentage_bar(50).chars().filter(|c| *c == '█').count(), 10);
    }

    #[test]
    fn test_truncate_string_is_char_safe() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("Crème hydratante", 8), "Crème...");
    }

    #[test]
    fn test_datetime_roundtrip_formats() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(deserialize_with = "deserialize")]
            at: DateTime<Utc>,
        }

        let local: Row = serde_json::from_str(r#"{"at":"2024-03-01 10:20:30"}"#).unwrap();
        let hosted: Row = serde_json::from_str(r#"{"at":"2024-03-01T10:20:30+00:00"}"#).unwrap();
        assert_eq!(local.at, hosted.at);
        assert_eq!(format_datetime(&local.at), "2024-03-01 10:20:30");
    }
}
