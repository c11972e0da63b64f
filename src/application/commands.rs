use crate::application::bootstrap::bootstrap_workspace;
use crate::application::month_grid::{GridCell, MonthGrid};
use crate::application::navigation::{CalendarController, CalendarState, ViewContent};
use crate::application::upcoming::upcoming;
use crate::domain::calendar_date::{CalendarDate, WEEKDAY_LABELS};
use crate::domain::models::{Accent, Direction, Event};
use crate::error::CalendarError;
use crate::infrastructure::clock::{Clock, NowProvider};
use crate::infrastructure::config::CalendarSettings;
use crate::infrastructure::event_index::{EventIndexCache, EventRepository, EventSnapshot};
use crate::infrastructure::event_source::load_events_file;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Facade the UI shell talks to. Holds the controller, the current event
/// snapshot and the index built from it.
pub struct CalendarService {
    config_dir: PathBuf,
    settings: CalendarSettings,
    clock: Clock,
    controller: CalendarController,
    events: EventSnapshot,
    index_cache: EventIndexCache,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CalendarStateResponse {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub view: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RejectedEventResponse {
    pub event_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReplaceEventsResponse {
    pub accepted: usize,
    pub rejected: Vec<RejectedEventResponse>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CellEventResponse {
    pub id: String,
    pub title: String,
    pub accent: Accent,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayCellResponse {
    pub day: Option<u32>,
    pub is_today: bool,
    pub events: Vec<CellEventResponse>,
    pub overflow: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthViewResponse {
    pub title: String,
    pub year: i32,
    pub month: u32,
    pub weekday_labels: Vec<String>,
    pub cells: Vec<DayCellResponse>,
    pub month_event_count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewResponse {
    Month(MonthViewResponse),
    Unavailable { mode: String, message: String },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpcomingEventResponse {
    pub id: String,
    pub title: String,
    pub date: String,
    pub display_date: String,
    pub time: String,
    pub duration: String,
    pub location: String,
    pub attendees: u32,
    pub organizer: String,
    pub event_type: String,
    pub category: String,
    pub accent: Accent,
}

impl CalendarService {
    pub fn new(workspace_root: PathBuf) -> Result<Self, CalendarError> {
        Self::with_now_provider(workspace_root, Arc::new(Utc::now))
    }

    pub fn with_now_provider(
        workspace_root: PathBuf,
        now_provider: NowProvider,
    ) -> Result<Self, CalendarError> {
        let bootstrap = bootstrap_workspace(&workspace_root)?;
        let clock = Clock::new(bootstrap.settings.timezone).with_now_provider(now_provider);
        let controller = CalendarController::new(clock.current_month()?);

        Ok(Self {
            config_dir: bootstrap.config_dir,
            settings: bootstrap.settings,
            clock,
            controller,
            events: Arc::from(Vec::new()),
            index_cache: EventIndexCache::default(),
        })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    pub fn state(&self) -> CalendarStateResponse {
        to_state_response(self.controller.state())
    }

    /// Swaps in a new snapshot and indexes it.
    pub fn replace_events(&mut self, events: Vec<Event>) -> ReplaceEventsResponse {
        self.events = Arc::from(events);
        let index = self.index_cache.index_for(&self.events);
        let rejected: Vec<RejectedEventResponse> = index
            .rejected()
            .iter()
            .map(|rejected| RejectedEventResponse {
                event_id: rejected.event_id.clone(),
                reason: rejected.error.to_string(),
            })
            .collect();
        ReplaceEventsResponse {
            accepted: self.events.len() - rejected.len(),
            rejected,
        }
    }

    pub fn load_events(&mut self, path: &Path) -> Result<ReplaceEventsResponse, CalendarError> {
        let decoded = log_failure("load_events", load_events_file(path))?;
        let mut response = self.replace_events(decoded.events);
        response.rejected.splice(
            0..0,
            decoded
                .rejected
                .into_iter()
                .map(|(event_id, error)| RejectedEventResponse {
                    event_id,
                    reason: error.to_string(),
                }),
        );
        Ok(response)
    }

    pub fn navigate(&mut self, direction: &str) -> Result<CalendarStateResponse, CalendarError> {
        let result = direction
            .parse::<Direction>()
            .and_then(|direction| self.controller.navigate(direction));
        log_failure("navigate", result)?;
        Ok(self.state())
    }

    pub fn set_view(&mut self, mode: &str) -> Result<CalendarStateResponse, CalendarError> {
        let state = log_failure("set_view", self.controller.set_view_named(mode))?;
        Ok(to_state_response(state))
    }

    pub fn jump_to_today(&mut self) -> Result<CalendarStateResponse, CalendarError> {
        let current = log_failure("jump_to_today", self.clock.current_month())?;
        self.controller.jump_to(current);
        Ok(self.state())
    }

    pub fn render_view(&mut self) -> ViewResponse {
        let today = self.clock.today();
        let preview_limit = self.settings.cell_preview_limit;
        let index = self.index_cache.index_for(&self.events);
        match self.controller.render(index) {
            ViewContent::Month { grid } => {
                let month_event_count = index.count_in_month(grid.anchor());
                ViewResponse::Month(to_month_view_response(
                    &grid,
                    &today,
                    preview_limit,
                    month_event_count,
                ))
            }
            ViewContent::Unavailable { mode, message } => ViewResponse::Unavailable {
                mode: mode.as_str().to_string(),
                message,
            },
        }
    }

    /// Upcoming relative to the clock's today, never the displayed month.
    pub fn upcoming_events(&self) -> Vec<UpcomingEventResponse> {
        upcoming(&self.events, &self.clock.today(), self.settings.upcoming_limit)
            .iter()
            .map(to_upcoming_response)
            .collect()
    }
}

fn log_failure<T>(command: &str, result: Result<T, CalendarError>) -> Result<T, CalendarError> {
    result.inspect_err(|error| tracing::error!(command, %error, "calendar command failed"))
}

fn to_state_response(state: CalendarState) -> CalendarStateResponse {
    CalendarStateResponse {
        year: state.anchor().year(),
        month: state.anchor().month(),
        title: state.anchor().title(),
        view: state.view().as_str().to_string(),
    }
}

fn to_month_view_response(
    grid: &MonthGrid,
    today: &CalendarDate,
    preview_limit: usize,
    month_event_count: usize,
) -> MonthViewResponse {
    let cells = grid
        .cells()
        .iter()
        .map(|cell| to_day_cell_response(grid, cell, today, preview_limit))
        .collect();
    MonthViewResponse {
        title: grid.anchor().title(),
        year: grid.anchor().year(),
        month: grid.anchor().month(),
        weekday_labels: WEEKDAY_LABELS.iter().map(|label| label.to_string()).collect(),
        cells,
        month_event_count,
    }
}

fn to_day_cell_response(
    grid: &MonthGrid,
    cell: &GridCell,
    today: &CalendarDate,
    preview_limit: usize,
) -> DayCellResponse {
    let preview = cell.preview(preview_limit);
    DayCellResponse {
        day: cell.day(),
        is_today: grid.is_today(cell, today),
        events: preview
            .shown
            .iter()
            .map(|event| CellEventResponse {
                id: event.id.clone(),
                title: event.title.clone(),
                accent: event.event_type.category().accent,
            })
            .collect(),
        overflow: preview.overflow,
    }
}

fn to_upcoming_response(event: &Event) -> UpcomingEventResponse {
    let category = event.event_type.category();
    UpcomingEventResponse {
        id: event.id.clone(),
        title: event.title.clone(),
        date: event.date.to_string(),
        display_date: short_display_date(&event.date),
        time: event.time.clone(),
        duration: event.duration.clone(),
        location: event.location.clone(),
        attendees: event.attendees,
        organizer: event.organizer.clone(),
        event_type: event.event_type.as_str().to_string(),
        category: category.label.to_string(),
        accent: category.accent,
    }
}

/// "Mar 25" style label.
fn short_display_date(date: &CalendarDate) -> String {
    NaiveDate::from_ymd_opt(date.year, date.month, date.day)
        .map(|value| value.format("%b %-d").to_string())
        .unwrap_or_else(|| date.to_string())
}
