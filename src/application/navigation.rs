use crate::application::month_grid::{build_month_grid_from, MonthGrid};
use crate::domain::calendar_date::YearMonth;
use crate::domain::models::{Direction, ViewMode};
use crate::error::CalendarError;
use crate::infrastructure::event_index::EventRepository;
use serde::Serialize;

/// Displayed month plus active view mode.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CalendarState {
    anchor: YearMonth,
    view: ViewMode,
}

impl CalendarState {
    pub fn new(anchor: YearMonth) -> Self {
        Self {
            anchor,
            view: ViewMode::Month,
        }
    }

    pub fn anchor(&self) -> YearMonth {
        self.anchor
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }
}

/// Next anchor after stepping one month. Applies in every view mode; there
/// are no bounds other than the representable year range.
pub fn navigate(state: &CalendarState, direction: Direction) -> Result<YearMonth, CalendarError> {
    state.anchor.shift(direction.delta())
}

/// Switches the active mode and leaves the anchor alone.
pub fn set_view(state: &CalendarState, mode: ViewMode) -> CalendarState {
    CalendarState {
        anchor: state.anchor,
        view: mode,
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewContent {
    Month { grid: MonthGrid },
    Unavailable { mode: ViewMode, message: String },
}

/// Month renders a grid; Week and Day are placeholders until they get a layout.
pub fn render<R>(state: &CalendarState, repository: &R) -> ViewContent
where
    R: EventRepository + ?Sized,
{
    match state.view {
        ViewMode::Month => ViewContent::Month {
            grid: build_month_grid_from(state.anchor, repository),
        },
        ViewMode::Week => ViewContent::Unavailable {
            mode: ViewMode::Week,
            message: "Week view coming soon".to_string(),
        },
        ViewMode::Day => ViewContent::Unavailable {
            mode: ViewMode::Day,
            message: "Day view coming soon".to_string(),
        },
    }
}

/// Long-lived owner of the calendar state. The anchor only moves through
/// the navigation methods below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarController {
    state: CalendarState,
}

impl CalendarController {
    /// Starts in month view on `current_month`.
    pub fn new(current_month: YearMonth) -> Self {
        Self {
            state: CalendarState::new(current_month),
        }
    }

    pub fn state(&self) -> CalendarState {
        self.state
    }

    pub fn anchor(&self) -> YearMonth {
        self.state.anchor
    }

    pub fn view(&self) -> ViewMode {
        self.state.view
    }

    pub fn navigate(&mut self, direction: Direction) -> Result<YearMonth, CalendarError> {
        let anchor = navigate(&self.state, direction)?;
        self.state.anchor = anchor;
        Ok(anchor)
    }

    pub fn set_view(&mut self, mode: ViewMode) -> CalendarState {
        self.state = set_view(&self.state, mode);
        self.state
    }

    /// String-facing variant; unknown modes are rejected and the state is unchanged.
    pub fn set_view_named(&mut self, mode: &str) -> Result<CalendarState, CalendarError> {
        let mode = mode.parse::<ViewMode>()?;
        Ok(self.set_view(mode))
    }

    pub fn jump_to(&mut self, month: YearMonth) -> YearMonth {
        self.state.anchor = month;
        month
    }

    pub fn render<R>(&self, repository: &R) -> ViewContent
    where
        R: EventRepository + ?Sized,
    {
        render(&self.state, repository)
    }
}
