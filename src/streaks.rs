use crate::dates::CalendarDate;
use std::collections::BTreeSet;

pub fn current_streak(completed: &BTreeSet<CalendarDate>, today: CalendarDate) -> u32 {
    let yesterday = today.previous_day();
    let mut cursor = Some(today);
    let mut streak = 0u32;

    for (index, &date) in completed.iter().rev().enumerate() {
        // Today not logged yet: the run may still end at yesterday.
        if index == 0 && Some(date) != cursor && Some(date) == yesterday {
            cursor = yesterday;
        }

        if Some(date) != cursor {
            break;
        }

        streak += 1;
        cursor = date.previous_day();
    }

    streak
}

pub fn longest_streak(completed: &BTreeSet<CalendarDate>) -> u32 {
    let mut dates = completed.iter();
    let Some(mut previous) = dates.next().copied() else {
        return 0;
    };

    let mut longest = 1u32;
    let mut running = 1u32;
    for &date in dates {
        if previous.days_until(date) == 1 {
            running += 1;
            longest = longest.max(running);
        } else {
            running = 1;
        }
        previous = date;
    }

    longest
}
