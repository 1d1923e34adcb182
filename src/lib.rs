pub mod app;
pub mod calendar;
pub mod dates;
pub mod errors;
pub mod habits;
pub mod handlers;
pub mod models;
pub mod stats;
pub mod storage;
pub mod streaks;
pub mod ui;
pub mod state;

pub use app::router;
pub use calendar::{month_grid, month_grid_at, DayCell};
pub use dates::CalendarDate;
pub use habits::{add_habit, toggle_completion};
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
pub use streaks::{current_streak, longest_streak};
