use crate::dates::CalendarDate;
use crate::models::Habit;
use serde::Serialize;

pub const MARK_CAP: usize = 3;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        CalendarDate::from_ymd(year, month, 1).map(|_| Self { year, month })
    }

    pub fn containing(date: CalendarDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Option<CalendarDate> {
        CalendarDate::from_ymd(self.year, self.month, 1)
    }

    pub fn previous(&self) -> Option<Self> {
        if self.month <= 1 {
            Self::new(self.year.checked_sub(1)?, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(&self) -> Option<Self> {
        if self.month >= 12 {
            Self::new(self.year.checked_add(1)?, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize]
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Completion {
    All { count: usize, colors: Vec<String> },
    Single { completed: bool, color: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayCell {
    Blank,
    Day {
        day: u32,
        date: CalendarDate,
        is_today: bool,
        completion: Completion,
    },
}

impl DayCell {
    pub fn is_blank(&self) -> bool {
        matches!(self, DayCell::Blank)
    }
}

pub fn month_grid(
    habits: &[Habit],
    year: i32,
    month: u32,
    filter_habit_id: Option<&str>,
) -> Vec<DayCell> {
    month_grid_at(CalendarDate::today(), habits, year, month, filter_habit_id)
}

pub fn month_grid_at(
    today: CalendarDate,
    habits: &[Habit],
    year: i32,
    month: u32,
    filter_habit_id: Option<&str>,
) -> Vec<DayCell> {
    let Some(first) = MonthRef::new(year, month).and_then(|target| target.first_day()) else {
        return Vec::new();
    };

    let selected = filter_habit_id.and_then(|id| habits.iter().find(|habit| habit.id == id));
    let leading_blanks = first.weekday().num_days_from_sunday() as usize;
    let total_days = days_in_month(year, month);

    let mut cells = Vec::with_capacity(leading_blanks + total_days as usize);
    cells.extend(std::iter::repeat_n(DayCell::Blank, leading_blanks));

    for offset in 0..total_days {
        let Some(date) = first.shift_days(i64::from(offset)) else {
            break;
        };
        let completion = match selected {
            Some(habit) => Completion::Single {
                completed: habit.is_completed_on(date),
                color: habit.color.clone(),
            },
            None => {
                let done: Vec<&Habit> = habits
                    .iter()
                    .filter(|habit| habit.is_completed_on(date))
                    .collect();
                Completion::All {
                    count: done.len(),
                    colors: done
                        .iter()
                        .take(MARK_CAP)
                        .map(|habit| habit.color.clone())
                        .collect(),
                }
            }
        };

        cells.push(DayCell::Day {
            day: date.day(),
            date,
            is_today: date == today,
            completion,
        });
    }

    cells
}
