//! Month grid endpoint

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    routing::get,
};
use chrono::{Datelike, Local, NaiveDate};
use daybook_core::Event;
use daybook_core::calendar::{format_event_date, format_time_12h, month_grid};
use serde::Serialize;

use crate::routes::AppError;
use crate::routes::events::{check_month, sorted};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/calendar/{year}/{month}", get(month_view))
}

/// One month laid out as Sunday-first weeks
#[derive(Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: String,
    pub in_current_month: bool,
    pub is_today: bool,
    /// Always empty for days outside the requested month
    pub events: Vec<CalendarEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    #[serde(flatten)]
    pub event: Event,
    /// "9:00 AM - 9:15 AM", "9:00 AM", or "All day" without a start time
    pub time_label: String,
}

impl From<Event> for CalendarEntry {
    fn from(event: Event) -> Self {
        let start = event.start_time.as_deref().and_then(format_time_12h);
        let end = event.end_time.as_deref().and_then(format_time_12h);

        let time_label = match (start, end) {
            (Some(start), Some(end)) => format!("{} - {}", start, end),
            (Some(start), None) => start,
            (None, _) => "All day".to_string(),
        };

        CalendarEntry { event, time_label }
    }
}

/// GET /api/calendar/:year/:month - Month grid with that month's events
async fn month_view(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Result<Json<MonthView>, AppError> {
    let Path((year, month)) = path?;
    check_month(month)?;

    let days = month_grid(year, month)
        .ok_or_else(|| AppError::BadRequest(format!("Year {} is out of range", year)))?;

    let events = sorted(state.storage().get_events_by_month(year, month));
    Ok(Json(build_month_view(
        year,
        month,
        &days,
        events,
        Local::now().date_naive(),
    )))
}

fn build_month_view(
    year: i32,
    month: u32,
    days: &[NaiveDate],
    events: Vec<Event>,
    today: NaiveDate,
) -> MonthView {
    let mut by_date: HashMap<String, Vec<CalendarEntry>> = HashMap::new();
    for event in events {
        by_date
            .entry(event.date.clone())
            .or_default()
            .push(event.into());
    }

    let days = days
        .iter()
        .map(|&day| {
            let in_current_month = day.year() == year && day.month() == month;
            let date = format_event_date(day);
            let events = if in_current_month {
                by_date.remove(&date).unwrap_or_default()
            } else {
                Vec::new()
            };

            CalendarDay {
                date,
                in_current_month,
                is_today: day == today,
                events,
            }
        })
        .collect();

    MonthView { year, month, days }
}
