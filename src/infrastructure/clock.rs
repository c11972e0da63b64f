use crate::domain::calendar_date::{CalendarDate, YearMonth};
use crate::error::CalendarError;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::sync::Arc;

pub type NowProvider = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Source of "today". Only the service facade reads it; grid and upcoming
/// computations receive dates as arguments.
#[derive(Clone)]
pub struct Clock {
    timezone: Tz,
    now_provider: NowProvider,
}

impl Clock {
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            now_provider: Arc::new(Utc::now),
        }
    }

    pub fn with_now_provider(mut self, now_provider: NowProvider) -> Self {
        self.now_provider = now_provider;
        self
    }

    pub fn now(&self) -> DateTime<Tz> {
        (self.now_provider)().with_timezone(&self.timezone)
    }

    pub fn today(&self) -> CalendarDate {
        CalendarDate::from(self.now().date_naive())
    }

    pub fn current_month(&self) -> Result<YearMonth, CalendarError> {
        self.today().year_month()
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock")
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}
