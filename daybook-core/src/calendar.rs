//! Date helpers for month views.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike, Weekday};

/// Parse a `YYYY-MM-DD` event date.
///
/// Stricter than `NaiveDate::parse_from_str`, which would also accept
/// `2024-3-5` or a five-digit year.
pub fn parse_event_date(s: &str) -> Option<NaiveDate> {
    if !has_shape(s, "dddd-dd-dd") {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a `HH:MM` 24-hour event time.
pub fn parse_event_time(s: &str) -> Option<NaiveTime> {
    if !has_shape(s, "dd:dd") {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// `d` in the pattern matches an ASCII digit, anything else matches itself.
fn has_shape(s: &str, pattern: &str) -> bool {
    s.len() == pattern.len()
        && s.bytes().zip(pattern.bytes()).all(|(c, p)| match p {
            b'd' => c.is_ascii_digit(),
            _ => c == p,
        })
}

/// Format an event date the way events store it.
pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Render a `HH:MM` time as `h:MM AM/PM`. Returns None for malformed input.
pub fn format_time_12h(time: &str) -> Option<String> {
    let t = parse_event_time(time)?;
    let (pm, hour) = t.hour12();
    let suffix = if pm { "PM" } else { "AM" };
    Some(format!("{}:{:02} {}", hour, t.minute(), suffix))
}

/// The first and last day of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl MonthRange {
    /// None when `month` is outside 1-12 or the year is out of chrono's range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last_day = first_day
            .checked_add_months(chrono::Months::new(1))?
            .pred_opt()?;
        Some(MonthRange {
            first_day,
            last_day,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }
}

/// Every day shown in a Sunday-first month grid: from the Sunday on or
/// before the 1st through the Saturday on or after the last day.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let range = MonthRange::new(year, month)?;

    let lead = range.first_day.weekday().num_days_from_sunday();
    let trail = 6 - range.last_day.weekday().num_days_from_sunday();

    let start = range.first_day.checked_sub_days(Days::new(lead.into()))?;
    let end = range.last_day.checked_add_days(Days::new(trail.into()))?;

    debug_assert_eq!(start.weekday(), Weekday::Sun);

    Some(start.iter_days().take_while(|d| *d <= end).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_event_date_requires_exact_shape() {
        assert_eq!(parse_event_date("2024-03-15"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_event_date("2024-3-15"), None);
        assert_eq!(parse_event_date("24-03-15"), None);
        assert_eq!(parse_event_date("2024/03/15"), None);
        assert_eq!(parse_event_date(" 2024-03-15"), None);
    }

    #[test]
    fn test_parse_event_date_rejects_impossible_days() {
        assert_eq!(parse_event_date("2024-02-30"), None);
        assert_eq!(parse_event_date("2023-02-29"), None);
        assert_eq!(parse_event_date("2024-02-29"), Some(ymd(2024, 2, 29)));
        assert_eq!(parse_event_date("2024-13-01"), None);
    }

    #[test]
    fn test_parse_event_time() {
        assert!(parse_event_time("00:00").is_some());
        assert!(parse_event_time("23:59").is_some());
        assert!(parse_event_time("24:00").is_none());
        assert!(parse_event_time("9:00").is_none());
        assert!(parse_event_time("09:60").is_none());
        assert!(parse_event_time("09:00:00").is_none());
    }

    #[test]
    fn test_format_time_12h() {
        assert_eq!(format_time_12h("00:05").as_deref(), Some("12:05 AM"));
        assert_eq!(format_time_12h("09:30").as_deref(), Some("9:30 AM"));
        assert_eq!(format_time_12h("12:00").as_deref(), Some("12:00 PM"));
        assert_eq!(format_time_12h("14:05").as_deref(), Some("2:05 PM"));
        assert_eq!(format_time_12h("nope"), None);
    }

    #[test]
    fn test_month_range_handles_leap_years_and_december() {
        let feb = MonthRange::new(2024, 2).unwrap();
        assert_eq!(feb.last_day, ymd(2024, 2, 29));

        let dec = MonthRange::new(2023, 12).unwrap();
        assert_eq!(dec.first_day, ymd(2023, 12, 1));
        assert_eq!(dec.last_day, ymd(2023, 12, 31));
        assert!(dec.contains(ymd(2023, 12, 31)));
        assert!(!dec.contains(ymd(2024, 1, 1)));

        assert!(MonthRange::new(2024, 0).is_none());
        assert!(MonthRange::new(2024, 13).is_none());
    }

    #[test]
    fn test_month_grid_covers_whole_weeks() {
        // March 2024: starts on a Friday, ends on a Sunday
        let days = month_grid(2024, 3).unwrap();

        assert_eq!(days.len() % 7, 0);
        assert_eq!(days.first(), Some(&ymd(2024, 2, 25)));
        assert_eq!(days.last(), Some(&ymd(2024, 4, 6)));
        assert_eq!(days.first().unwrap().weekday(), Weekday::Sun);
        assert_eq!(days.last().unwrap().weekday(), Weekday::Sat);
        assert!(days.contains(&ymd(2024, 3, 1)));
        assert!(days.contains(&ymd(2024, 3, 31)));
    }

    #[test]
    fn test_month_grid_exact_fit() {
        // February 2026 starts on a Sunday and ends on a Saturday
        let days = month_grid(2026, 2).unwrap();
        assert_eq!(days.len(), 28);
        assert_eq!(days[0], ymd(2026, 2, 1));
    }
}
