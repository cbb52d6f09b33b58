//! Reminder attachment and the enumerated tone set.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;
use crate::utils::datetime::{format_reminder_time, parse_reminder_time};

/// Tone played when a reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Gentle,
    Classic,
    Digital,
    Chime,
    Urgent,
}

impl Tone {
    pub const ALL: [Tone; 5] = [Tone::Gentle, Tone::Classic, Tone::Digital, Tone::Chime, Tone::Urgent];

    /// Identifier used in storage and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            Tone::Gentle => "gentle",
            Tone::Classic => "classic",
            Tone::Digital => "digital",
            Tone::Chime => "chime",
            Tone::Urgent => "urgent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Gentle => "Gentle",
            Tone::Classic => "Classic",
            Tone::Digital => "Digital",
            Tone::Chime => "Chime",
            Tone::Urgent => "Urgent",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tone::Gentle => "🔔",
            Tone::Classic => "🎵",
            Tone::Digital => "📱",
            Tone::Chime => "🎶",
            Tone::Urgent => "⚡",
        }
    }

    /// Beep onsets in milliseconds from the start of playback
    pub fn beep_pattern(&self) -> &'static [u64] {
        match self {
            // soft arpeggio
            Tone::Gentle => &[0, 180, 360, 540],
            // bell chord, struck almost together
            Tone::Classic => &[0, 80, 160],
            // beep, rest, beep, rest, high beep
            Tone::Digital => &[0, 240, 480],
            // pentatonic descent
            Tone::Chime => &[0, 150, 300, 450, 600],
            // three double pulses
            Tone::Urgent => &[0, 120, 280, 400, 560, 680],
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.id() == wanted)
            .ok_or_else(|| ValidationError::UnknownTone(s.to_string()))
    }
}

/// A time-of-day plus tone attached to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(serialize_with = "serialize_time", deserialize_with = "deserialize_time")]
    pub time: NaiveTime,
    #[serde(default, deserialize_with = "deserialize_tone")]
    pub tone: Tone,
}

impl Reminder {
    pub fn new(time: NaiveTime, tone: Tone) -> Self {
        Self { time, tone }
    }

    /// Build a reminder from user input.
    ///
    /// A missing tone falls back to `default_tone`.
    pub fn parse(time: &str, tone: Option<&str>, default_tone: Tone) -> Result<Self, ValidationError> {
        let time = parse_reminder_time(time).ok_or_else(|| ValidationError::InvalidTime(time.to_string()))?;
        let tone = match tone {
            Some(tone) => tone.parse()?,
            None => default_tone,
        };
        Ok(Self { time, tone })
    }

    /// Time formatted as `HH:MM`
    pub fn time_label(&self) -> String {
        format_reminder_time(self.time)
    }
}

fn serialize_time<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_reminder_time(*time))
}

fn deserialize_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_reminder_time(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid reminder time '{}'", raw)))
}

/// A null or blank tone reads as the default. Unknown names are still an error.
fn deserialize_tone<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Tone, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.parse().map_err(serde::de::Error::custom),
        _ => Ok(Tone::default()),
    }
}

/// Decode an optional stored reminder, normalizing anything malformed to `None`.
///
/// Used on task records so that a bad reminder never poisons the whole list.
pub(crate) fn deserialize_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Reminder>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value::<Reminder>(value).ok()))
}
