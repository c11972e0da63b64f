pub mod bootstrap;
pub mod commands;
pub mod month_grid;
pub mod navigation;
pub mod upcoming;
