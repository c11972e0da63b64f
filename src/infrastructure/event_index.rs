use crate::domain::calendar_date::{CalendarDate, YearMonth};
use crate::domain::models::Event;
use crate::error::CalendarError;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only event collection handed over by the event source. A new
/// allocation means a new snapshot; indexes are keyed on its identity.
pub type EventSnapshot = Arc<[Event]>;

pub trait EventRepository {
    /// Events dated exactly `date`, in source order.
    fn events_on(&self, date: &CalendarDate) -> Vec<Event>;
    fn count_in_month(&self, anchor: YearMonth) -> usize;
}

#[derive(Debug)]
pub struct RejectedEvent {
    pub event_id: String,
    pub error: CalendarError,
}

#[derive(Debug)]
pub struct EventIndex {
    snapshot: EventSnapshot,
    by_date: HashMap<CalendarDate, Vec<usize>>,
    rejected: Vec<RejectedEvent>,
}

impl EventIndex {
    pub fn build(snapshot: EventSnapshot) -> Self {
        let mut by_date: HashMap<CalendarDate, Vec<usize>> = HashMap::new();
        let mut rejected = Vec::new();
        for (position, event) in snapshot.iter().enumerate() {
            if let Err(error) = event.validate() {
                tracing::warn!(event_id = %event.id, %error, "excluding event from calendar index");
                rejected.push(RejectedEvent {
                    event_id: event.id.clone(),
                    error,
                });
                continue;
            }
            by_date.entry(event.date).or_default().push(position);
        }
        tracing::debug!(
            events = snapshot.len(),
            dates = by_date.len(),
            rejected = rejected.len(),
            "built calendar event index"
        );
        Self {
            snapshot,
            by_date,
            rejected,
        }
    }

    pub fn rejected(&self) -> &[RejectedEvent] {
        &self.rejected
    }

    pub fn is_built_from(&self, snapshot: &EventSnapshot) -> bool {
        Arc::ptr_eq(&self.snapshot, snapshot)
    }
}

impl EventRepository for EventIndex {
    fn events_on(&self, date: &CalendarDate) -> Vec<Event> {
        self.by_date
            .get(date)
            .map(|positions| {
                positions
                    .iter()
                    .map(|position| self.snapshot[*position].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn count_in_month(&self, anchor: YearMonth) -> usize {
        self.by_date
            .iter()
            .filter(|(date, _)| anchor.contains(date))
            .map(|(_, positions)| positions.len())
            .sum()
    }
}

/// Holds the index for the most recent snapshot and rebuilds it whenever a
/// different snapshot is presented.
#[derive(Debug, Default)]
pub struct EventIndexCache {
    current: Option<EventIndex>,
}

impl EventIndexCache {
    pub fn index_for(&mut self, snapshot: &EventSnapshot) -> &EventIndex {
        let stale = self
            .current
            .as_ref()
            .is_none_or(|index| !index.is_built_from(snapshot));
        if stale {
            self.current = Some(EventIndex::build(Arc::clone(snapshot)));
        }
        self.current
            .get_or_insert_with(|| EventIndex::build(Arc::clone(snapshot)))
    }
}

/// Uncached lookup over a plain slice.
pub fn events_on(
    year: i32,
    month: u32,
    day: u32,
    events: &[Event],
) -> Result<Vec<Event>, CalendarError> {
    let date = CalendarDate::new(year, month, day)?;
    Ok(events
        .iter()
        .filter(|event| event.validate().is_ok() && event.date == date)
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::EventType;
    use proptest::prelude::*;

    fn event(id: &str, year: i32, month: u32, day: u32) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            date: CalendarDate { year, month, day },
            time: "7:00 PM".to_string(),
            duration: "2 hours".to_string(),
            location: "Main Campus".to_string(),
            event_type: EventType::Networking,
            attendees: 10,
            organizer: "Alumni Association".to_string(),
        }
    }

    fn scenario_events() -> Vec<Event> {
        vec![
            event("1", 2024, 3, 25),
            event("2", 2024, 3, 30),
            event("3", 2024, 4, 8),
            event("4", 2024, 4, 15),
            event("5", 2024, 4, 20),
        ]
    }

    #[test]
    fn events_on_matches_exact_date_only() {
        let events = scenario_events();
        let march = events_on(2024, 3, 25, &events).expect("lookup");
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].id, "1");
        assert!(events_on(2024, 4, 25, &events).expect("lookup").is_empty());
    }

    #[test]
    fn events_on_rejects_invalid_query_date() {
        assert!(matches!(
            events_on(2024, 13, 1, &scenario_events()),
            Err(CalendarError::InvalidDate(_))
        ));
    }

    #[test]
    fn empty_collection_returns_empty_lists() {
        let index = EventIndex::build(Arc::from(Vec::<Event>::new()));
        let date = CalendarDate::new(2024, 3, 25).expect("valid");
        assert!(index.events_on(&date).is_empty());
        assert!(index.rejected().is_empty());
        assert!(events_on(2024, 3, 25, &[]).expect("lookup").is_empty());
    }

    #[test]
    fn index_preserves_insertion_order_for_same_day() {
        let snapshot: EventSnapshot = Arc::from(vec![
            event("b", 2024, 3, 25),
            event("x", 2024, 3, 26),
            event("a", 2024, 3, 25),
        ]);
        let index = EventIndex::build(snapshot);
        let date = CalendarDate::new(2024, 3, 25).expect("valid");
        let ids: Vec<String> = index.events_on(&date).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn blank_id_with_valid_date_is_still_indexed() {
        let events = vec![event("", 2024, 3, 25)];
        assert_eq!(events_on(2024, 3, 25, &events).expect("lookup").len(), 1);

        let index = EventIndex::build(Arc::from(events));
        let date = CalendarDate::new(2024, 3, 25).expect("valid");
        assert_eq!(index.events_on(&date).len(), 1);
        assert!(index.rejected().is_empty());
    }

    #[test]
    fn malformed_event_dates_are_isolated() {
        let snapshot: EventSnapshot = Arc::from(vec![
            event("ok", 2024, 3, 25),
            event("bad-day", 2024, 3, 32),
            event("bad-month", 2024, 13, 1),
        ]);
        let index = EventIndex::build(snapshot);
        assert_eq!(index.rejected().len(), 2);
        assert_eq!(index.rejected()[0].event_id, "bad-day");
        assert!(matches!(
            index.rejected()[1].error,
            CalendarError::InvalidEvent(_)
        ));
        let date = CalendarDate::new(2024, 3, 25).expect("valid");
        assert_eq!(index.events_on(&date).len(), 1);
    }

    #[test]
    fn count_in_month_ignores_other_months() {
        let index = EventIndex::build(Arc::from(scenario_events()));
        assert_eq!(index.count_in_month(YearMonth::new(2024, 3).expect("valid")), 2);
        assert_eq!(index.count_in_month(YearMonth::new(2024, 4).expect("valid")), 3);
        assert_eq!(index.count_in_month(YearMonth::new(2025, 3).expect("valid")), 0);
    }

    #[test]
    fn cache_rebuilds_when_snapshot_changes() {
        let mut cache = EventIndexCache::default();
        let first: EventSnapshot = Arc::from(scenario_events());
        let date = CalendarDate::new(2024, 3, 25).expect("valid");

        assert_eq!(cache.index_for(&first).events_on(&date).len(), 1);
        assert!(cache.index_for(&first).is_built_from(&first));

        let second: EventSnapshot = Arc::from(vec![event("9", 2024, 3, 25), event("10", 2024, 3, 25)]);
        let index = cache.index_for(&second);
        assert!(index.is_built_from(&second));
        assert_eq!(index.events_on(&date).len(), 2);
    }

    proptest! {
        #[test]
        fn index_returns_event_iff_dates_match(
            days in proptest::collection::vec((1u32..=12u32, 1u32..=28u32), 0..40),
            query_month in 1u32..=12u32,
            query_day in 1u32..=28u32
        ) {
            let events: Vec<Event> = days
                .iter()
                .enumerate()
                .map(|(position, (month, day))| event(&position.to_string(), 2024, *month, *day))
                .collect();
            let query = CalendarDate::new(2024, query_month, query_day).expect("valid");
            let index = EventIndex::build(Arc::from(events.clone()));

            let found = index.events_on(&query);
            let expected: Vec<Event> = events.into_iter().filter(|e| e.date == query).collect();
            prop_assert_eq!(found, expected);
        }
    }
}
