use crate::dates::CalendarDate;
use crate::models::Habit;
use std::collections::BTreeSet;
use uuid::Uuid;

pub const ICON_OPTIONS: [&str; 10] = [
    "💪", "📚", "🏃‍♀️", "💧", "🧘‍♀️", "🎨", "✍️", "🎵", "🌸", "⭐",
];

pub const COLOR_OPTIONS: [&str; 8] = [
    "#E91E8C", "#DDA5E8", "#FFB3D9", "#C77DFF", "#FF99C8", "#B388FF", "#FF80AB", "#CE93D8",
];

impl Habit {
    pub fn new(name: &str, icon: &str, color: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            completed_dates: BTreeSet::new(),
        })
    }
}

pub fn add_habit(habits: &[Habit], name: &str, icon: &str, color: &str) -> Option<Vec<Habit>> {
    let habit = Habit::new(name, icon, color)?;
    let mut updated = habits.to_vec();
    updated.push(habit);
    Some(updated)
}

pub fn toggle_completion(habits: &[Habit], habit_id: &str, date: CalendarDate) -> Vec<Habit> {
    habits
        .iter()
        .map(|habit| {
            if habit.id != habit_id {
                return habit.clone();
            }

            let mut habit = habit.clone();
            if !habit.completed_dates.remove(&date) {
                habit.completed_dates.insert(date);
            }
            habit
        })
        .collect()
}

pub fn seed_habits() -> Vec<Habit> {
    fn seeded(id: &str, name: &str, icon: &str, color: &str, dates: &[&str]) -> Habit {
        Habit {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            completed_dates: dates.iter().filter_map(|d| CalendarDate::parse(d)).collect(),
        }
    }

    vec![
        seeded(
            "1",
            "Morning Exercise",
            "💪",
            "#E91E8C",
            &["2025-10-20", "2025-10-21", "2025-10-22", "2025-10-23", "2025-10-24"],
        ),
        seeded(
            "2",
            "Read 30 Minutes",
            "📚",
            "#DDA5E8",
            &["2025-10-22", "2025-10-23", "2025-10-24"],
        ),
        seeded(
            "3",
            "Drink Water",
            "💧",
            "#C77DFF",
            &["2025-10-23", "2025-10-24"],
        ),
    ]
}
