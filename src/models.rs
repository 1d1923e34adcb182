use crate::calendar::{DayCell, MonthRef};
use crate::dates::CalendarDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub completed_dates: BTreeSet<CalendarDate>,
}

impl Habit {
    pub fn is_completed_on(&self, date: CalendarDate) -> bool {
        self.completed_dates.contains(&date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub habits: Vec<Habit>,
}

impl AppData {
    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }
}

#[derive(Debug, Deserialize)]
pub struct NewHabitRequest {
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ToggleRequest {
    pub date: Option<CalendarDate>,
    pub today: Option<CalendarDate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TodayQuery {
    pub today: Option<CalendarDate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub habit: Option<String>,
    pub today: Option<CalendarDate>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub habit_id: String,
    pub date: CalendarDate,
    pub completed: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub completed_today: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub today: CalendarDate,
    pub active_habits: usize,
    pub completed_today: usize,
    pub total_streak_days: u32,
    pub habits: Vec<HabitSummary>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub previous: Option<MonthRef>,
    pub next: Option<MonthRef>,
    pub weekdays: [&'static str; 7],
    pub habit: Option<String>,
    pub cells: Vec<DayCell>,
}
