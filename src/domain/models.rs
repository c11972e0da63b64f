use crate::domain::calendar_date::CalendarDate;
use crate::error::CalendarError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Talk,
    Workshop,
    Networking,
    Reunion,
    Academic,
    Other,
}

impl EventType {
    /// Unknown tags map to `Other` instead of failing.
    pub fn from_tag(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "talk" | "event" => Self::Talk,
            "workshop" => Self::Workshop,
            "networking" => Self::Networking,
            "reunion" => Self::Reunion,
            "academic" => Self::Academic,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Talk => "talk",
            Self::Workshop => "workshop",
            Self::Networking => "networking",
            Self::Reunion => "reunion",
            Self::Academic => "academic",
            Self::Other => "other",
        }
    }

    pub fn category(&self) -> DisplayCategory {
        match self {
            Self::Talk => DisplayCategory::new("Tech Talks", Accent::Blue),
            Self::Workshop => DisplayCategory::new("Workshops", Accent::Green),
            Self::Networking => DisplayCategory::new("Networking", Accent::Purple),
            Self::Reunion => DisplayCategory::new("Reunions", Accent::Red),
            Self::Academic => DisplayCategory::new("Academic", Accent::Indigo),
            Self::Other => DisplayCategory::new("Other", Accent::Gray),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Blue,
    Green,
    Purple,
    Red,
    Indigo,
    Gray,
}

/// Legend entry and colour used when rendering an event badge.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DisplayCategory {
    pub label: &'static str,
    pub accent: Accent,
}

impl DisplayCategory {
    const fn new(label: &'static str, accent: Accent) -> Self {
        Self { label, accent }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: CalendarDate,
    pub time: String,
    pub duration: String,
    pub location: String,
    pub event_type: EventType,
    pub attendees: u32,
    pub organizer: String,
}

impl Event {
    /// Only the date decides whether an event can be placed on the calendar.
    pub fn validate(&self) -> Result<(), CalendarError> {
        self.date.validate().map_err(|error| {
            CalendarError::InvalidEvent(format!("event '{}' has an invalid date: {error}", self.id))
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
        }
    }
}

impl FromStr for ViewMode {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            "day" => Ok(Self::Day),
            other => Err(CalendarError::InvalidView(format!("unknown view mode: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    pub fn delta(self) -> i32 {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }
}

impl FromStr for Direction {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "prev" | "previous" => Ok(Self::Prev),
            "next" => Ok(Self::Next),
            other => Err(CalendarError::InvalidView(format!(
                "unknown navigation direction: {other}"
            ))),
        }
    }
}
