use std::{fmt::Display, str::FromStr};

use anyhow::{anyhow, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quantity indicator of a logged event. Stored as the bare integers 1..3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Amount {
    Small = 1,
    Medium = 2,
    Large = 3,
}

/// Urgency felt when the event was logged. Stored as the bare integers 1..3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Urgency {
    Low = 1,
    Moderate = 2,
    High = 3,
}

impl Amount {
    pub const ALL: [Amount; 3] = [Amount::Small, Amount::Medium, Amount::Large];

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Amount::Small => "small",
            Amount::Medium => "medium",
            Amount::Large => "large",
        }
    }
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Low, Urgency::Moderate, Urgency::High];

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Moderate => "moderate",
            Urgency::High => "high",
        }
    }
}

impl TryFrom<u8> for Amount {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Amount::ALL
            .into_iter()
            .find(|v| v.level() == value)
            .ok_or_else(|| anyhow!("Amount must be between 1 and 3, got {value}"))
    }
}

impl TryFrom<u8> for Urgency {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Urgency::ALL
            .into_iter()
            .find(|v| v.level() == value)
            .ok_or_else(|| anyhow!("Urgency must be between 1 and 3, got {value}"))
    }
}

impl From<Amount> for u8 {
    fn from(value: Amount) -> Self {
        value.level()
    }
}

impl From<Urgency> for u8 {
    fn from(value: Urgency) -> Self {
        value.level()
    }
}

impl FromStr for Amount {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(level) = s.parse::<u8>() {
            return Amount::try_from(level);
        }
        match Amount::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
        {
            Some(v) => Ok(v),
            None => bail!("Can't parse {s} into amount. Use 1-3 or small, medium, large"),
        }
    }
}

impl FromStr for Urgency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(level) = s.parse::<u8>() {
            return Urgency::try_from(level);
        }
        match Urgency::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
        {
            Some(v) => Ok(v),
            None => bail!("Can't parse {s} into urgency. Use 1-3 or low, moderate, high"),
        }
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single logged occurrence. Events are never mutated after creation, the only way to get rid
/// of one is deleting it by [Event::id].
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub id: String,
    #[serde(with = "timestamp_ser")]
    pub timestamp: DateTime<Utc>,
    pub amount: Amount,
    pub urgency: Urgency,
}

impl Event {
    pub fn with_amount(self, amount: Amount) -> Self {
        Self { amount, ..self }
    }

    pub fn with_urgency(self, urgency: Urgency) -> Self {
        Self { urgency, ..self }
    }
}

/// What the user submits. Identifier and, unless overridden, timestamp are assigned by
/// [EventStore](super::event_store::EventStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDraft {
    pub amount: Amount,
    pub urgency: Urgency,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            amount: Amount::Medium,
            urgency: Urgency::Low,
            timestamp: None,
        }
    }
}

mod timestamp_ser {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|v| v.to_utc())
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{TimeZone, Utc};

    use super::{Amount, Event, Urgency};

    #[test]
    fn event_uses_flat_persistence_format() -> Result<()> {
        let event = Event {
            id: "1704096000000".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
            amount: Amount::Large,
            urgency: Urgency::Moderate,
        };
        let json = serde_json::to_string(&event)?;
        assert_eq!(
            json,
            r#"{"id":"1704096000000","timestamp":"2024-01-01T08:00:00.000Z","amount":3,"urgency":2}"#
        );
        Ok(())
    }

    #[test]
    fn event_reads_offset_timestamps() -> Result<()> {
        let event: Event = serde_json::from_str(
            r#"{"id":"a","timestamp":"2024-01-01T09:30:00+01:00","amount":1,"urgency":1}"#,
        )?;
        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap()
        );
        Ok(())
    }

    #[test]
    fn out_of_range_levels_are_rejected() {
        let result = serde_json::from_str::<Event>(
            r#"{"id":"a","timestamp":"2024-01-01T08:00:00.000Z","amount":4,"urgency":1}"#,
        );
        assert!(result.is_err());
        let result = serde_json::from_str::<Event>(
            r#"{"id":"a","timestamp":"2024-01-01T08:00:00.000Z","amount":1,"urgency":0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn levels_parse_from_digits_and_names() -> Result<()> {
        assert_eq!("2".parse::<Amount>()?, Amount::Medium);
        assert_eq!("Large".parse::<Amount>()?, Amount::Large);
        assert_eq!("high".parse::<Urgency>()?, Urgency::High);
        assert_eq!(" 1 ".parse::<Urgency>()?, Urgency::Low);
        assert!("4".parse::<Amount>().is_err());
        assert!("extreme".parse::<Urgency>().is_err());
        Ok(())
    }
}
