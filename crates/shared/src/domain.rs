use std::{fmt, str::FromStr};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseAnswerError;

pub const YES_MESSAGE: &str = "¡Excelente! Estaré muy emocionado de conocerte mejor 😊";
pub const NO_MESSAGE: &str =
    "Entiendo perfectamente, respeto tu decisión. ¡Que tengas un gran día! 😊";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    /// Fixed acknowledgement shown to the user once the answer is committed.
    pub fn message(self) -> &'static str {
        match self {
            Self::Yes => YES_MESSAGE,
            Self::No => NO_MESSAGE,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Answer {
    type Err = ParseAnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            other => Err(ParseAnswerError {
                value: other.to_string(),
            }),
        }
    }
}

/// The single answer record collected from the user.
///
/// Fields are private so a `Response` can only be built through
/// [`Response::new`]; there is no way to edit one in place. Deserializing goes
/// through [`StoredResponse`], so the message is always rebuilt from the answer
/// and a stored message is never trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredResponse")]
pub struct Response {
    answer: Answer,
    #[serde(with = "iso_millis")]
    timestamp: DateTime<Utc>,
    message: String,
}

impl Response {
    /// Builds the record for `answer` at `at`, truncated to millisecond
    /// precision to match the persisted ISO-8601 form.
    pub fn new(answer: Answer, at: DateTime<Utc>) -> Self {
        let timestamp = DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at);
        Self {
            answer,
            timestamp,
            message: answer.message().to_string(),
        }
    }

    pub fn now(answer: Answer) -> Self {
        Self::new(answer, Utc::now())
    }

    pub fn answer(&self) -> Answer {
        self.answer
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Persisted shape of a [`Response`]. Any stored `message` is ignored.
#[derive(Deserialize)]
struct StoredResponse {
    answer: Answer,
    #[serde(with = "iso_millis")]
    timestamp: DateTime<Utc>,
}

impl From<StoredResponse> for Response {
    fn from(stored: StoredResponse) -> Self {
        Self::new(stored.answer, stored.timestamp)
    }
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn message_depends_only_on_answer() {
        let early = Utc.with_ymd_and_hms(2024, 2, 14, 8, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2030, 12, 31, 23, 59, 59).unwrap();

        assert_eq!(Response::new(Answer::Yes, early).message(), YES_MESSAGE);
        assert_eq!(Response::new(Answer::Yes, late).message(), YES_MESSAGE);
        assert_eq!(Response::new(Answer::No, early).message(), NO_MESSAGE);
        assert_eq!(Response::new(Answer::No, late).message(), NO_MESSAGE);
    }

    #[test]
    fn serializes_to_persisted_layout() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 12, 30, 0).unwrap()
            + chrono::Duration::milliseconds(123);
        let value = serde_json::to_value(Response::new(Answer::Yes, at)).unwrap();

        assert_eq!(value["answer"], "yes");
        assert_eq!(value["timestamp"], "2026-10-16T12:30:00.123Z");
        assert_eq!(value["message"], YES_MESSAGE);
    }

    #[test]
    fn timestamp_is_truncated_to_millis() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(1_234_567);
        let response = Response::new(Answer::No, at);
        assert_eq!(response.timestamp_iso(), "2026-01-01T00:00:00.001Z");

        let json = serde_json::to_string(&response).unwrap();
        let decoded: Response = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn rejects_unknown_answer_values() {
        let raw = r#"{"answer":"maybe","timestamp":"2026-01-01T00:00:00.000Z","message":"x"}"#;
        assert!(serde_json::from_str::<Response>(raw).is_err());

        let missing = r#"{"timestamp":"2026-01-01T00:00:00.000Z","message":"x"}"#;
        assert!(serde_json::from_str::<Response>(missing).is_err());
    }

    #[test]
    fn stored_message_is_rebuilt_from_answer() {
        let raw = r#"{"answer":"yes","timestamp":"2026-01-01T00:00:00.000Z","message":"texto inventado"}"#;
        let decoded: Response = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.message(), YES_MESSAGE);

        let without = r#"{"answer":"no","timestamp":"2026-01-01T00:00:00.000Z"}"#;
        let decoded: Response = serde_json::from_str(without).unwrap();
        assert_eq!(decoded.message(), NO_MESSAGE);
    }

    #[test]
    fn parses_answer_case_insensitively() {
        assert_eq!("YES".parse::<Answer>().unwrap(), Answer::Yes);
        assert_eq!(" no ".parse::<Answer>().unwrap(), Answer::No);
        assert!("si".parse::<Answer>().is_err());
    }
}
