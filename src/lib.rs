//! Calendar engine for the alumni network: Sunday-first month grids with
//! events resolved per day, an upcoming-events list, and month/week/day
//! navigation state.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::commands::{
    CalendarService, CalendarStateResponse, DayCellResponse, MonthViewResponse,
    ReplaceEventsResponse, UpcomingEventResponse, ViewResponse,
};
pub use application::month_grid::{build_month_grid, build_month_grid_from, GridCell, MonthGrid};
pub use application::navigation::{
    navigate, render, set_view, CalendarController, CalendarState, ViewContent,
};
pub use application::upcoming::upcoming;
pub use domain::calendar_date::{
    days_in_month, first_weekday_of_month, is_leap_year, is_same_calendar_day, shift_month,
    CalendarDate, YearMonth, WEEKDAY_LABELS,
};
pub use domain::models::{Accent, Direction, DisplayCategory, Event, EventType, ViewMode};
pub use error::CalendarError;
pub use infrastructure::event_index::{
    events_on, EventIndex, EventIndexCache, EventRepository, EventSnapshot,
};
