use std::{borrow::Borrow, fmt};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Rendered in place of a timestamp that could not be interpreted.
pub const INVALID_DATE: &str = "Invalid Date";

/// `1/1/2024, 12:00:00 AM` style, the way browsers print a local date-time.
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomName(pub String);

impl RoomName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RoomName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for RoomName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Creation time of a message as sent by the server.
///
/// Servers send either an ISO-8601 string or epoch milliseconds. Values that
/// fit neither shape are kept so a single odd entry does not invalidate the
/// whole message list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MessageTimestamp {
    At(DateTime<Utc>),
    Unparsed(String),
    #[default]
    Missing,
}

impl MessageTimestamp {
    pub fn parse_str(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::At(at.with_timezone(&Utc));
        }
        // date-times without an offset are wall-clock time where the viewer runs
        for format in NAIVE_DATE_TIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return match Local.from_local_datetime(&naive).earliest() {
                    Some(at) => Self::At(at.with_timezone(&Utc)),
                    None => Self::Unparsed(raw.to_string()),
                };
            }
        }
        if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Self::At(midnight.and_utc());
        }
        Self::Unparsed(raw.to_string())
    }

    pub fn from_epoch_millis(millis: i64) -> Self {
        DateTime::from_timestamp_millis(millis)
            .map_or_else(|| Self::Unparsed(millis.to_string()), Self::At)
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::At(at) => Some(*at),
            Self::Unparsed(_) | Self::Missing => None,
        }
    }

    /// Formats the instant in the process-local time zone.
    pub fn to_local_string(&self) -> String {
        self.format_in(&Local)
    }

    pub fn format_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self.instant() {
            Some(at) => at.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
            None => INVALID_DATE.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for MessageTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => Self::Missing,
            Value::String(raw) => Self::parse_str(&raw),
            Value::Number(number) => match number.as_i64() {
                Some(millis) => Self::from_epoch_millis(millis),
                None => number
                    .as_f64()
                    .map(|millis| Self::from_epoch_millis(millis as i64))
                    .unwrap_or_else(|| Self::Unparsed(number.to_string())),
            },
            other => Self::Unparsed(other.to_string()),
        })
    }
}

impl Serialize for MessageTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::At(at) => {
                serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Self::Unparsed(raw) => serializer.serialize_str(raw),
            Self::Missing => serializer.serialize_none(),
        }
    }
}

/// One entry of a room's message list, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message_text: String,
    #[serde(default)]
    pub timestamp: MessageTimestamp,
    #[serde(default, deserialize_with = "lenient_string")]
    pub visitor_id: String,
}

/// Accepts any JSON scalar where a string is expected; `null` becomes empty.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
