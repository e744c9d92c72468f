//! Request and response shapes exchanged at the API boundary

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Inbound user payload for create and update
///
/// Every field is optional so the same shape serves partial updates.
/// `accountCreate` is a point in time; it becomes a calendar date in the
/// server's local time zone when mapped to a stored account.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserData {
    #[serde(rename = "userName", default)]
    pub user_name: Option<String>,
    #[serde(rename = "userID", default)]
    pub user_id: Option<String>,
    #[serde(alias = "userPW", default)]
    pub password: Option<String>,
    #[serde(
        rename = "accountCreate",
        default,
        deserialize_with = "deserialize_timestamp"
    )]
    pub account_create: Option<DateTime<Utc>>,
}

impl fmt::Debug for UserData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserData")
            .field("user_name", &self.user_name)
            .field("user_id", &self.user_id)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("account_create", &self.account_create)
            .finish()
    }
}

/// Outbound view of a stored account
///
/// The password is never part of the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: i64,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "accountCreate")]
    pub account_create: NaiveDate,
}

/// Accepts epoch milliseconds, an RFC 3339 timestamp, or a bare
/// `YYYY-MM-DD` date taken as UTC midnight.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Millis(i64),
        Text(String),
    }

    match Option::<RawTimestamp>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawTimestamp::Millis(ms)) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
        Some(RawTimestamp::Text(text)) => parse_timestamp_text(&text)
            .map(Some)
            .map_err(de::Error::custom),
    }
}

fn parse_timestamp_text(text: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid accountCreate value: {text}"))
}
