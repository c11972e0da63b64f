pub mod clock;
pub mod config;
pub mod event_index;
pub mod event_source;
