pub mod calendar_date;
pub mod models;
