//! Month grid for the calendar view.
//!
//! The grid is always six Sunday-start weeks, so every month renders as the
//! same rectangle no matter how many days it has or where it starts.

use chrono::{Datelike, Days, Months, NaiveDate, TimeZone};

use crate::datetime::start_of_day;
use crate::event::Event;

pub const DAYS_PER_WEEK: usize = 7;
pub const GRID_WEEKS: usize = 6;
pub const GRID_CELLS: usize = DAYS_PER_WEEK * GRID_WEEKS;

/// The 42 dates shown for one month, including padding from the months around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub reference: NaiveDate,
    pub days: [NaiveDate; GRID_CELLS],
}

impl MonthGrid {
    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.days.chunks(DAYS_PER_WEEK)
    }

    /// Whether `date` belongs to the month being shown (not padding)
    pub fn in_month(&self, date: NaiveDate) -> bool {
        date.year() == self.reference.year() && date.month() == self.reference.month()
    }
}

pub fn build_month_grid(reference: NaiveDate) -> MonthGrid {
    let first_of_month = first_of_month(reference);
    let offset = u64::from(first_of_month.weekday().num_days_from_sunday());
    let grid_start = first_of_month - Days::new(offset);

    MonthGrid {
        reference,
        days: std::array::from_fn(|i| grid_start + Days::new(i as u64)),
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Events starting on `date` in `tz`, earliest first.
///
/// The day is the half-open range from local midnight to the next local
/// midnight, so an event at exactly the next midnight belongs to tomorrow.
pub fn events_for_day<'a, Tz: TimeZone>(
    date: NaiveDate,
    events: &'a [Event],
    tz: &Tz,
) -> Vec<&'a Event> {
    let day_start = start_of_day(date, tz);
    let day_end = start_of_day(date + Days::new(1), tz);

    let mut day_events: Vec<&Event> = events
        .iter()
        .filter(|e| e.start >= day_start && e.start < day_end)
        .collect();

    day_events.sort_by(|a, b| a.start.cmp(&b.start));
    day_events
}

/// Same day of month one month earlier, clamped to the month's last day
pub fn prev_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

/// Same day of month one month later, clamped to the month's last day
pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc, Weekday};
    use chrono_tz::Europe::Berlin;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event_at(id: &str, start: DateTime<Utc>) -> Event {
        Event {
            id: id.to_string(),
            title: id.to_string(),
            start,
            duration: 30,
            description: None,
            attendees: vec![],
        }
    }

    #[test]
    fn test_grid_is_42_consecutive_days() {
        for reference in [
            date(2024, 2, 10),
            date(2024, 9, 1),
            date(2023, 12, 31),
            date(2026, 2, 1),
            date(2015, 2, 28),
        ] {
            let grid = build_month_grid(reference);
            assert_eq!(grid.days.len(), GRID_CELLS);

            for pair in grid.days.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }

            assert_eq!(grid.days[0].weekday(), Weekday::Sun);
            assert_eq!(grid.days[7].weekday(), Weekday::Sun);
            assert!(grid.days.contains(&first_of_month(reference)));
        }
    }

    #[test]
    fn test_grid_starts_on_first_when_month_starts_on_sunday() {
        // September 2024 starts on a Sunday
        let grid = build_month_grid(date(2024, 9, 17));
        assert_eq!(grid.days[0], date(2024, 9, 1));
        assert_eq!(grid.days[41], date(2024, 10, 12));
    }

    #[test]
    fn test_grid_pads_from_previous_month() {
        // March 2024 starts on a Friday
        let grid = build_month_grid(date(2024, 3, 15));
        assert_eq!(grid.days[0], date(2024, 2, 25));
        assert_eq!(grid.days[5], date(2024, 3, 1));
        assert!(!grid.in_month(grid.days[0]));
        assert!(grid.in_month(grid.days[5]));
        assert_eq!(grid.weeks().count(), GRID_WEEKS);
    }

    #[test]
    fn test_events_for_day_sorted_and_half_open() {
        let events = vec![
            event_at("late", Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()),
            event_at("midnight", Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()),
            event_at("next-midnight", Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap()),
            event_at("morning", Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()),
            event_at("before", Utc.with_ymd_and_hms(2024, 3, 14, 23, 59, 59).unwrap()),
        ];

        let ids: Vec<&str> = events_for_day(date(2024, 3, 15), &events, &Utc)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();

        assert_eq!(ids, vec!["midnight", "morning", "late"]);
    }

    #[test]
    fn test_events_for_day_uses_local_midnight() {
        // 23:30 UTC on the 14th is 00:30 on the 15th in Berlin (UTC+1 in March)
        let events = vec![event_at(
            "early",
            Utc.with_ymd_and_hms(2024, 3, 14, 23, 30, 0).unwrap(),
        )];

        assert_eq!(events_for_day(date(2024, 3, 15), &events, &Berlin).len(), 1);
        assert!(events_for_day(date(2024, 3, 14), &events, &Berlin).is_empty());
        assert!(events_for_day(date(2024, 3, 15), &events, &Utc).is_empty());
    }

    #[test]
    fn test_month_navigation_by_calendar_month() {
        assert_eq!(next_month(date(2024, 1, 15)), date(2024, 2, 15));
        assert_eq!(prev_month(date(2024, 3, 15)), date(2024, 2, 15));
        assert_eq!(next_month(date(2024, 12, 5)), date(2025, 1, 5));
        assert_eq!(prev_month(date(2024, 1, 5)), date(2023, 12, 5));
        // Clamped where the target month is shorter
        assert_eq!(next_month(date(2024, 1, 31)), date(2024, 2, 29));
        assert_eq!(prev_month(date(2023, 3, 31)), date(2023, 2, 28));
    }
}
