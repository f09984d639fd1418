//! The task record and its persisted representation.
//!
//! A [`Task`] serializes field-for-field into the on-disk JSON document:
//! priorities as their ordinal values (1-4), statuses as snake_case strings,
//! timestamps as `YYYY-MM-DD HH:MM:SS` and due dates as `YYYY-MM-DD`.
//! Those encodings are a compatibility contract with existing data files,
//! so the enum ordinals and format strings here are load-bearing.

use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format used for `created_date` and `completed_date`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Priority
// ============================================================================

/// Task priority. Higher ordinal = more urgent.
///
/// The ordinals (1-4) are persisted as-is and also drive the priority sort,
/// so they must not change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
    Urgent = 4,
}

impl Priority {
    /// The persisted ordinal value (1-4).
    #[must_use]
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            4 => Ok(Self::Urgent),
            other => Err(format!("invalid priority value: {other} (expected 1-4)")),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// Status
// ============================================================================

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Todo => "todo",
            Self::InProgress => "in progress",
            Self::Done => "done",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// Task
// ============================================================================

/// A single trackable unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, monotonically assigned, never reused after deletion.
    pub id: u64,

    /// Non-empty title.
    pub title: String,

    /// Free-form description, may be empty.
    #[serde(default)]
    pub description: String,

    pub priority: Priority,

    pub status: Status,

    /// Set once at creation, immutable thereafter.
    #[serde(with = "timestamp")]
    pub created_date: NaiveDateTime,

    /// Optional deadline (calendar date, no time component).
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// `Some` iff `status == Done`. Maintained by the store.
    #[serde(default, with = "opt_timestamp")]
    pub completed_date: Option<NaiveDateTime>,
}

impl Task {
    /// Whether the task still needs work (status is not Done).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status != Status::Done
    }
}

// ============================================================================
// Serde helpers for the space-separated timestamp format
// ============================================================================

mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        datetime: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&datetime.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

mod opt_timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        datetime: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match datetime {
            Some(dt) => serializer.serialize_str(&dt.format(TIMESTAMP_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
