//! Sample events for a fresh store.

use chrono::{Days, NaiveDate};

use crate::calendar::format_event_date;
use crate::color::EventColor;
use crate::event::InsertEvent;

/// (day offset, title, description, start, end, color)
const SAMPLES: &[(u64, &str, &str, &str, &str, EventColor)] = &[
    (
        0,
        "Team Meeting",
        "Weekly team sync and project updates",
        "10:00",
        "11:00",
        EventColor::Blue,
    ),
    (
        2,
        "Client Presentation",
        "Present the quarterly results to the client",
        "14:00",
        "15:30",
        EventColor::Red,
    ),
    (
        5,
        "Design Workshop",
        "Collaborative design session for the new product",
        "09:00",
        "12:00",
        EventColor::Green,
    ),
    (
        7,
        "Code Review",
        "Review pull requests and discuss implementation",
        "16:00",
        "17:00",
        EventColor::Amber,
    ),
    (
        10,
        "Project Planning",
        "Plan the roadmap for next quarter",
        "13:00",
        "14:30",
        EventColor::Blue,
    ),
];

/// Sample events dated relative to `today`. Offsets may cross into the next month.
pub fn sample_events(today: NaiveDate) -> Vec<InsertEvent> {
    SAMPLES
        .iter()
        .filter_map(|&(offset, title, description, start, end, color)| {
            let date = today.checked_add_days(Days::new(offset))?;
            Some(InsertEvent {
                title: title.to_string(),
                description: Some(description.to_string()),
                date: format_event_date(date),
                start_time: Some(start.to_string()),
                end_time: Some(end.to_string()),
                color,
            })
        })
        .collect()
}
