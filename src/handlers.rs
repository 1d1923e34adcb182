use crate::calendar::{month_grid_at, MonthRef, WEEKDAY_LABELS};
use crate::dates::CalendarDate;
use crate::errors::AppError;
use crate::habits::{add_habit, toggle_completion, COLOR_OPTIONS, ICON_OPTIONS};
use crate::models::{
    CalendarQuery, CalendarResponse, Habit, NewHabitRequest, StatsResponse, TodayQuery,
    ToggleRequest, ToggleResponse,
};
use crate::state::AppState;
use crate::stats::build_stats_at;
use crate::streaks::{current_streak, longest_streak};
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::{debug, info};

pub async fn index() -> Html<String> {
    Html(render_index(CalendarDate::today()))
}

pub async fn list_habits(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let today = query.today.unwrap_or_else(CalendarDate::today);
    let data = state.data.lock().await;
    Ok(Json(build_stats_at(today, &data)))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let icon = payload.icon.as_deref().unwrap_or(ICON_OPTIONS[0]);
    let color = payload.color.as_deref().unwrap_or(COLOR_OPTIONS[0]);

    let mut data = state.data.lock().await;
    let Some(habits) = add_habit(&data.habits, &payload.name, icon, color) else {
        return Err(AppError::bad_request("habit name must not be empty"));
    };
    data.habits = habits;

    let created = data
        .habits
        .last()
        .cloned()
        .ok_or_else(|| AppError::bad_request("habit was not created"))?;
    info!(habit_id = %created.id, name = %created.name, "habit created");

    state.save(&data).await;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let today = payload.today.unwrap_or_else(CalendarDate::today);
    let date = payload.date.unwrap_or(today);

    let mut data = state.data.lock().await;
    if data.habit(&habit_id).is_none() {
        return Err(AppError::not_found(format!("unknown habit '{habit_id}'")));
    }
    data.habits = toggle_completion(&data.habits, &habit_id, date);

    let habit = data
        .habit(&habit_id)
        .ok_or_else(|| AppError::not_found(format!("unknown habit '{habit_id}'")))?;
    let response = ToggleResponse {
        habit_id: habit.id.clone(),
        date,
        completed: habit.is_completed_on(date),
        current_streak: current_streak(&habit.completed_dates, today),
        longest_streak: longest_streak(&habit.completed_dates),
    };
    info!(habit_id = %response.habit_id, %date, completed = response.completed, "completion toggled");

    state.save(&data).await;
    Ok(Json(response))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let today = query.today.unwrap_or_else(CalendarDate::today);
    let current = MonthRef::containing(today);
    let year = query.year.unwrap_or(current.year);
    let month = query.month.unwrap_or(current.month);
    let target = MonthRef::new(year, month)
        .ok_or_else(|| AppError::bad_request("month must be between 1 and 12"))?;

    let filter = query.habit.as_deref().filter(|id| !id.is_empty());
    let data = state.data.lock().await;
    let cells = month_grid_at(today, &data.habits, target.year, target.month, filter);
    debug!(year, month, cells = cells.len(), "calendar built");

    Ok(Json(CalendarResponse {
        year: target.year,
        month: target.month,
        title: target.title(),
        previous: target.previous(),
        next: target.next(),
        weekdays: WEEKDAY_LABELS,
        habit: filter.map(str::to_string),
        cells,
    }))
}
