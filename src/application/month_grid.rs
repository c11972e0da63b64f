use crate::domain::calendar_date::{is_same_calendar_day, CalendarDate, YearMonth};
use crate::domain::models::Event;
use crate::error::CalendarError;
use crate::infrastructure::event_index::{EventIndex, EventRepository};
use serde::Serialize;
use std::sync::Arc;

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridCell {
    /// Padding before the 1st of the month.
    Empty,
    Day { day: u32, events: Vec<Event> },
}

impl GridCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            Self::Empty => None,
            Self::Day { day, .. } => Some(*day),
        }
    }

    pub fn events(&self) -> &[Event] {
        match self {
            Self::Empty => &[],
            Self::Day { events, .. } => events,
        }
    }

    /// First `limit` events plus the number left out.
    pub fn preview(&self, limit: usize) -> CellPreview<'_> {
        let events = self.events();
        let shown = events.len().min(limit);
        CellPreview {
            shown: &events[..shown],
            overflow: events.len() - shown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPreview<'a> {
    pub shown: &'a [Event],
    pub overflow: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthGrid {
    anchor: YearMonth,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn anchor(&self) -> YearMonth {
        self.anchor
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn leading_empty_count(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, GridCell::Empty))
            .count()
    }

    /// Sunday-first rows of seven; the last row is left short.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn cell_for_day(&self, day: u32) -> Option<&GridCell> {
        if day == 0 || day > self.anchor.days_in_month() {
            return None;
        }
        self.cells.get(self.leading_empty_count() + day as usize - 1)
    }

    pub fn cell_date(&self, cell: &GridCell) -> Option<CalendarDate> {
        cell.day().map(|day| CalendarDate {
            year: self.anchor.year(),
            month: self.anchor.month(),
            day,
        })
    }

    pub fn is_today(&self, cell: &GridCell, today: &CalendarDate) -> bool {
        self.cell_date(cell)
            .is_some_and(|date| is_same_calendar_day(&date, today))
    }

    pub fn event_count(&self) -> usize {
        self.cells.iter().map(|cell| cell.events().len()).sum()
    }
}

/// Leading padding followed by one cell per day, each holding that day's events.
pub fn build_month_grid_from<R>(anchor: YearMonth, repository: &R) -> MonthGrid
where
    R: EventRepository + ?Sized,
{
    let leading = anchor.first_weekday() as usize;
    let days = anchor.days_in_month();
    let mut cells = Vec::with_capacity(leading + days as usize);
    cells.extend(std::iter::repeat_n(GridCell::Empty, leading));
    for day in 1..=days {
        let date = CalendarDate {
            year: anchor.year(),
            month: anchor.month(),
            day,
        };
        cells.push(GridCell::Day {
            day,
            events: repository.events_on(&date),
        });
    }
    MonthGrid { anchor, cells }
}

pub fn build_month_grid(
    year: i32,
    month: u32,
    events: &[Event],
) -> Result<MonthGrid, CalendarError> {
    let anchor = YearMonth::new(year, month)?;
    let index = EventIndex::build(Arc::from(events));
    Ok(build_month_grid_from(anchor, &index))
}
