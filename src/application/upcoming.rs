use crate::domain::calendar_date::CalendarDate;
use crate::domain::models::Event;

/// Events dated on or after `today`, earliest first, at most `limit` of them.
///
/// Only calendar dates are compared, so an event later on the same day is
/// still upcoming. Events sharing a date keep their source order. Events
/// with malformed dates are skipped.
pub fn upcoming(events: &[Event], today: &CalendarDate, limit: usize) -> Vec<Event> {
    let mut selected: Vec<&Event> = events
        .iter()
        .filter(|event| event.validate().is_ok() && event.date >= *today)
        .collect();
    selected.sort_by_key(|event| event.date);
    selected.into_iter().take(limit).cloned().collect()
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
            time: "9:00 AM".to_string(),
            duration: "8 hours".to_string(),
            location: "Conference Center".to_string(),
            event_type: EventType::Academic,
            attendees: 124,
            organizer: "Research Committee".to_string(),
        }
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|event| event.id.as_str()).collect()
    }

    #[test]
    fn returns_all_scenario_events_in_date_order() {
        let events = vec![
            event("1", 2024, 3, 25),
            event("2", 2024, 3, 30),
            event("3", 2024, 4, 8),
            event("4", 2024, 4, 15),
            event("5", 2024, 4, 20),
        ];
        let now = CalendarDate::new(2024, 3, 1).expect("valid");
        let selected = upcoming(&events, &now, 5);
        assert_eq!(ids(&selected), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn sorts_unordered_input_and_truncates() {
        let events = vec![
            event("late", 2024, 4, 20),
            event("past", 2024, 2, 1),
            event("early", 2024, 3, 25),
            event("mid", 2024, 4, 8),
        ];
        let now = CalendarDate::new(2024, 3, 1).expect("valid");
        assert_eq!(ids(&upcoming(&events, &now, 2)), vec!["early", "mid"]);
        assert!(upcoming(&events, &now, 0).is_empty());
    }

    #[test]
    fn same_day_counts_as_upcoming_and_ties_keep_source_order() {
        let events = vec![
            event("second", 2024, 3, 25),
            event("yesterday", 2024, 3, 24),
            event("first", 2024, 3, 25),
        ];
        let now = CalendarDate::new(2024, 3, 25).expect("valid");
        assert_eq!(ids(&upcoming(&events, &now, 5)), vec!["second", "first"]);
    }

    #[test]
    fn input_is_left_untouched_and_malformed_dates_are_skipped() {
        let events = vec![event("b", 2024, 5, 1), event("bad", 2024, 4, 31), event("a", 2024, 4, 1)];
        let before = events.clone();
        let now = CalendarDate::new(2024, 1, 1).expect("valid");
        assert_eq!(ids(&upcoming(&events, &now, 5)), vec!["a", "b"]);
        assert_eq!(events, before);
    }

    #[test]
    fn blank_id_with_valid_date_is_upcoming() {
        let events = vec![event("", 2024, 3, 25)];
        let now = CalendarDate::new(2024, 3, 1).expect("valid");
        assert_eq!(upcoming(&events, &now, 5).len(), 1);
    }

    proptest! {
        #[test]
        fn output_is_sorted_and_never_before_now(
            dates in proptest::collection::vec((2023i32..2026i32, 1u32..=12u32, 1u32..=28u32), 0..50),
            now_month in 1u32..=12u32,
            limit in 0usize..10usize
        ) {
            let events: Vec<Event> = dates
                .iter()
                .enumerate()
                .map(|(position, (year, month, day))| event(&position.to_string(), *year, *month, *day))
                .collect();
            let now = CalendarDate::new(2024, now_month, 15).expect("valid");
            let selected = upcoming(&events, &now, limit);

            prop_assert!(selected.len() <= limit);
            prop_assert!(selected.iter().all(|event| event.date >= now));
            prop_assert!(selected.windows(2).all(|pair| pair[0].date <= pair[1].date));
        }
    }
}
