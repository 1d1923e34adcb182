use crate::dates::CalendarDate;
use crate::models::{AppData, Habit, HabitSummary, StatsResponse};
use crate::streaks::{current_streak, longest_streak};

pub fn build_stats(data: &AppData) -> StatsResponse {
    build_stats_at(CalendarDate::today(), data)
}

pub fn build_stats_at(today: CalendarDate, data: &AppData) -> StatsResponse {
    let habits: Vec<HabitSummary> = data
        .habits
        .iter()
        .map(|habit| summarize(habit, today))
        .collect();

    StatsResponse {
        today,
        active_habits: habits.len(),
        completed_today: habits.iter().filter(|habit| habit.completed_today).count(),
        total_streak_days: habits.iter().map(|habit| habit.current_streak).sum(),
        habits,
    }
}

pub fn summarize(habit: &Habit, today: CalendarDate) -> HabitSummary {
    HabitSummary {
        id: habit.id.clone(),
        name: habit.name.clone(),
        icon: habit.icon.clone(),
        color: habit.color.clone(),
        completed_today: habit.is_completed_on(today),
        current_streak: current_streak(&habit.completed_dates, today),
        longest_streak: longest_streak(&habit.completed_dates),
        total_completions: habit.completed_dates.len(),
    }
}
