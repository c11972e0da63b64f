use crate::domain::calendar_date::CalendarDate;
use crate::domain::models::{Event, EventType};
use crate::error::CalendarError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Event record as stored by the surrounding application: the date is a
/// `YYYY-MM-DD` string and the type is a free-form tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawEventRecord {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub attendees: u32,
    #[serde(default)]
    pub organizer: String,
}

#[derive(Debug, Default)]
pub struct DecodedEvents {
    pub events: Vec<Event>,
    pub rejected: Vec<(String, CalendarError)>,
}

pub fn decode_event(record: &RawEventRecord) -> Result<Event, CalendarError> {
    let id = record.id.trim();
    if id.is_empty() {
        return Err(CalendarError::InvalidEvent(
            "event id must not be empty".to_string(),
        ));
    }
    let date = CalendarDate::parse(&record.date).map_err(|error| {
        CalendarError::InvalidEvent(format!("event '{id}' has an invalid date: {error}"))
    })?;

    Ok(Event {
        id: id.to_string(),
        title: record.title.trim().to_string(),
        date,
        time: record.time.trim().to_string(),
        duration: record.duration.trim().to_string(),
        location: record.location.trim().to_string(),
        event_type: EventType::from_tag(&record.event_type),
        attendees: record.attendees,
        organizer: record.organizer.trim().to_string(),
    })
}

pub fn encode_event(event: &Event) -> RawEventRecord {
    RawEventRecord {
        id: event.id.clone(),
        title: event.title.clone(),
        date: event.date.to_string(),
        time: event.time.clone(),
        duration: event.duration.clone(),
        location: event.location.clone(),
        event_type: event.event_type.as_str().to_string(),
        color: None,
        attendees: event.attendees,
        organizer: event.organizer.clone(),
    }
}

/// Decodes every record it can; a malformed record never fails the batch.
pub fn decode_events(records: &[RawEventRecord]) -> DecodedEvents {
    let mut decoded = DecodedEvents::default();
    for record in records {
        match decode_event(record) {
            Ok(event) => decoded.events.push(event),
            Err(error) => {
                tracing::warn!(event_id = %record.id, %error, "skipping malformed event record");
                decoded.rejected.push((record.id.clone(), error));
            }
        }
    }
    decoded
}

pub fn parse_events_json(raw: &str) -> Result<DecodedEvents, CalendarError> {
    let records: Vec<RawEventRecord> = serde_json::from_str(raw)?;
    Ok(decode_events(&records))
}

pub fn load_events_file(path: &Path) -> Result<DecodedEvents, CalendarError> {
    let raw = fs::read_to_string(path)?;
    parse_events_json(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE_JSON: &str = r#"[
        {
            "id": "1",
            "title": "Alumni Tech Talk: AI in Healthcare",
            "date": "2024-03-25",
            "time": "7:00 PM",
            "duration": "2 hours",
            "location": "Virtual Event",
            "type": "event",
            "color": "bg-blue-500",
            "attendees": 156,
            "organizer": "Dr. Sarah Johnson"
        },
        {
            "id": "2",
            "title": "Career Development Workshop",
            "date": "2024-03-30",
            "time": "6:00 PM",
            "duration": "3 hours",
            "location": "Virtual Event",
            "type": "workshop",
            "attendees": 67,
            "organizer": "Career Services"
        },
        {
            "id": "3",
            "title": "Broken",
            "date": "2024-03-32",
            "type": "gala"
        }
    ]"#;

    #[test]
    fn decode_source_records_and_isolate_malformed_dates() {
        let decoded = parse_events_json(SOURCE_JSON).expect("parse events");
        assert_eq!(decoded.events.len(), 2);
        assert_eq!(decoded.events[0].event_type, EventType::Talk);
        assert_eq!(
            decoded.events[0].date,
            CalendarDate::new(2024, 3, 25).expect("valid")
        );
        assert_eq!(decoded.rejected.len(), 1);
        assert_eq!(decoded.rejected[0].0, "3");
        assert!(matches!(decoded.rejected[0].1, CalendarError::InvalidEvent(_)));
    }

    #[test]
    fn unknown_type_tag_decodes_as_other() {
        let mut record = encode_event(
            &decode_events(&[RawEventRecord {
                id: "7".to_string(),
                title: "Gala".to_string(),
                date: "2024-05-01".to_string(),
                time: String::new(),
                duration: String::new(),
                location: String::new(),
                event_type: "gala".to_string(),
                color: None,
                attendees: 0,
                organizer: String::new(),
            }])
            .events[0],
        );
        assert_eq!(record.event_type, "other");
        record.event_type = "reunion".to_string();
        assert_eq!(
            decode_event(&record).expect("decode").event_type,
            EventType::Reunion
        );
    }

    #[test]
    fn encode_then_decode_preserves_event() {
        let decoded = parse_events_json(SOURCE_JSON).expect("parse events");
        let event = &decoded.events[1];
        assert_eq!(&decode_event(&encode_event(event)).expect("decode"), event);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            parse_events_json("{not json"),
            Err(CalendarError::Json(_))
        ));
    }
}
