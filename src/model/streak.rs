use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default, deserialize_with = "date_or_timestamp")]
    pub last_active_date: Option<NaiveDate>,
}

// The API sends either a plain date or a full RFC 3339 timestamp.
fn date_or_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| Some(ts.date_naive()))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_plain_date() {
        let s: StreakState =
            serde_json::from_str(r#"{"currentStreak": 4, "lastActiveDate": "2024-03-09"}"#).unwrap();
        assert_eq!(s.current_streak, 4);
        assert_eq!(s.last_active_date, NaiveDate::from_ymd_opt(2024, 3, 9));
    }

    #[test]
    fn parses_timestamp_and_null() {
        let s: StreakState = serde_json::from_str(
            r#"{"currentStreak": 1, "lastActiveDate": "2024-03-09T17:45:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(s.last_active_date, NaiveDate::from_ymd_opt(2024, 3, 9));

        let s: StreakState =
            serde_json::from_str(r#"{"currentStreak": 0, "lastActiveDate": null}"#).unwrap();
        assert_eq!(s.last_active_date, None);
    }

    #[test]
    fn rejects_garbage_date() {
        let res: Result<StreakState, _> =
            serde_json::from_str(r#"{"currentStreak": 0, "lastActiveDate": "yesterday"}"#);
        assert!(res.is_err());
    }
}
