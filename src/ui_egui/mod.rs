mod app;
pub mod drag;
pub mod slot_editor;
pub mod theme;
pub mod views;

pub use app::{SchedulerApp, WeekNavigator};
