//! Week grid
//!
//! Places events into a 7 day × 14 hour grid. An event occupies exactly one cell, the one of
//! its start day and start hour, no matter how long it lasts. Events starting before 07:00 or
//! after 20:59 belong to the week but are not placed in any cell.
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use school_portal_client::api::v1::calendar::Event;
use std::ops::RangeInclusive;

pub const FIRST_HOUR: u32 = 7;
pub const LAST_HOUR: u32 = 20;
pub const DAYS_PER_WEEK: usize = 7;

const HOURS_PER_DAY: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;

/// Largest day count a [`Duration`] holds without overflowing its milliseconds
const MAX_SHIFT_DAYS: u64 = (i64::MAX / 86_400_000) as u64;

/// The hours shown as rows of the grid
pub fn hours() -> RangeInclusive<u32> {
    FIRST_HOUR..=LAST_HOUR
}

/// Anything that can be placed into the grid
pub trait Scheduled {
    fn starts_at(&self) -> NaiveDateTime;
}

impl Scheduled for Event {
    fn starts_at(&self) -> NaiveDateTime {
        self.start_time
    }
}

/// A Monday to Sunday week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    start: NaiveDate,
    end: NaiveDate,
}

impl Week {
    /// The week containing `anchor`, moved by `offset` weeks
    ///
    /// Returns `None` if the week lies outside of the representable dates.
    pub fn containing(anchor: NaiveDate, offset: i64) -> Option<Self> {
        let since_monday = i64::from(anchor.weekday().num_days_from_monday());
        let monday = anchor.checked_sub_signed(Duration::days(since_monday))?;

        let shift = offset
            .unsigned_abs()
            .checked_mul(7)
            .filter(|days| *days <= MAX_SHIFT_DAYS)?;
        let shift = Duration::days(shift as i64);

        let start = if offset < 0 {
            monday.checked_sub_signed(shift)
        } else {
            monday.checked_add_signed(shift)
        }?;
        let end = start.checked_add_signed(Duration::days(6))?;

        Some(Week { start, end })
    }

    /// Monday of the week
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Sunday of the week
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(DAYS_PER_WEEK)
    }

    /// Returns true if `timestamp` lies between Monday 00:00 and Sunday 23:59:59
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        let date = timestamp.date();
        date >= self.start && date <= self.end
    }

    /// Zero based day index, Monday is `0`
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        let index = (date - self.start).num_days();
        (0..DAYS_PER_WEEK as i64)
            .contains(&index)
            .then(|| index as usize)
    }
}

/// The events of one week laid out by day and start hour
#[derive(Debug)]
pub struct WeekGrid<'a, T = Event> {
    week: Week,
    /// Indexed by `[day][hour - FIRST_HOUR]`
    cells: Vec<Vec<Vec<&'a T>>>,
    in_week: usize,
}

impl<'a, T> WeekGrid<'a, T>
where
    T: Scheduled,
{
    /// Places `events` into the grid of `week`, keeping their order within each cell
    pub fn build(week: Week, events: &'a [T]) -> Self {
        let mut cells = vec![vec![Vec::new(); HOURS_PER_DAY]; DAYS_PER_WEEK];
        let mut in_week = 0;

        for event in events {
            let start = event.starts_at();

            if !week.contains(start) {
                continue;
            }
            in_week += 1;

            let hour = start.hour();
            if !hours().contains(&hour) {
                continue;
            }

            if let Some(day) = week.day_index(start.date()) {
                cells[day][(hour - FIRST_HOUR) as usize].push(event);
            }
        }

        WeekGrid {
            week,
            cells,
            in_week,
        }
    }

    pub fn week(&self) -> Week {
        self.week
    }

    /// The events starting on `day` (0 = Monday) during `hour`
    pub fn cell(&self, day: usize, hour: u32) -> &[&'a T] {
        if !hours().contains(&hour) {
            return &[];
        }

        self.cells
            .get(day)
            .and_then(|hours| hours.get((hour - FIRST_HOUR) as usize))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of events starting in the week, including those outside the displayed hours
    pub fn events_in_week(&self) -> usize {
        self.in_week
    }

    pub fn is_empty(&self) -> bool {
        self.in_week == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Weekday;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Slot {
        name: &'static str,
        start: NaiveDateTime,
    }

    impl Scheduled for Slot {
        fn starts_at(&self) -> NaiveDateTime {
            self.start
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(name: &'static str, y: i32, m: u32, d: u32, h: u32, min: u32) -> Slot {
        Slot {
            name,
            start: date(y, m, d).and_hms_opt(h, min, 0).unwrap(),
        }
    }

    fn names<'a>(cell: &[&'a Slot]) -> Vec<&'static str> {
        cell.iter().map(|slot| slot.name).collect()
    }

    #[test]
    fn week_of_a_wednesday() {
        let week = Week::containing(date(2024, 6, 12), 0).unwrap();

        assert_eq!(week.start(), date(2024, 6, 10));
        assert_eq!(week.end(), date(2024, 6, 16));
    }

    #[test]
    fn week_of_a_sunday() {
        let week = Week::containing(date(2024, 6, 16), 0).unwrap();

        assert_eq!(week.start(), date(2024, 6, 10));
    }

    #[test]
    fn week_of_a_monday() {
        let week = Week::containing(date(2024, 6, 10), 0).unwrap();

        assert_eq!(week.start(), date(2024, 6, 10));
    }

    #[test]
    fn offsets() {
        assert_eq!(
            Week::containing(date(2024, 6, 12), 1).unwrap().start(),
            date(2024, 6, 17)
        );
        assert_eq!(
            Week::containing(date(2024, 6, 12), -2).unwrap().start(),
            date(2024, 5, 27)
        );
        // across a year boundary
        assert_eq!(
            Week::containing(date(2024, 12, 31), 0).unwrap().start(),
            date(2024, 12, 30)
        );
        assert_eq!(
            Week::containing(date(2024, 12, 31), 0).unwrap().end(),
            date(2025, 1, 5)
        );
    }

    #[test]
    fn start_is_always_a_monday() {
        let mut anchor = date(2023, 12, 20);

        for offset in -3..=3 {
            for _ in 0..30 {
                let week = Week::containing(anchor, offset).unwrap();

                assert_eq!(week.start().weekday(), Weekday::Mon);
                assert_eq!(week.end() - week.start(), Duration::days(6));
                assert_eq!(week.days().count(), DAYS_PER_WEEK);

                anchor = anchor.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn out_of_range_offsets() {
        assert_eq!(Week::containing(date(2024, 6, 12), 100_000_000), None);
        assert_eq!(Week::containing(date(2024, 6, 12), -100_000_000), None);
        assert_eq!(Week::containing(date(2024, 6, 12), i64::MAX), None);
        assert_eq!(Week::containing(date(2024, 6, 12), i64::MIN), None);
        assert!(Week::containing(date(2024, 6, 12), 13_000_000).is_some());
    }

    #[test]
    fn contains_whole_days() {
        let week = Week::containing(date(2024, 6, 12), 0).unwrap();

        assert!(week.contains(date(2024, 6, 10).and_hms_opt(0, 0, 0).unwrap()));
        assert!(week.contains(date(2024, 6, 16).and_hms_opt(23, 59, 59).unwrap()));
        assert!(!week.contains(date(2024, 6, 9).and_hms_opt(23, 59, 59).unwrap()));
        assert!(!week.contains(date(2024, 6, 17).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn wednesday_scenario() {
        let events = vec![
            slot("maths", 2024, 6, 12, 9, 30),
            slot("too early", 2024, 6, 12, 6, 0),
        ];

        let grid = WeekGrid::build(Week::containing(date(2024, 6, 12), 0).unwrap(), &events);

        assert_eq!(names(grid.cell(2, 9)), vec!["maths"]);

        let placed = (0..DAYS_PER_WEEK)
            .flat_map(|day| hours().map(move |hour| (day, hour)))
            .map(|(day, hour)| grid.cell(day, hour).len())
            .sum::<usize>();
        assert_eq!(placed, 1);
        assert_eq!(grid.events_in_week(), 2);
        assert!(!grid.is_empty());
    }

    #[test]
    fn each_event_placed_exactly_once() {
        let events = vec![
            slot("mon 7", 2024, 6, 10, 7, 0),
            slot("sun 20", 2024, 6, 16, 20, 59),
            slot("thu 14", 2024, 6, 13, 14, 15),
        ];

        let grid = WeekGrid::build(Week::containing(date(2024, 6, 12), 0).unwrap(), &events);

        for (expected, day, hour) in [("mon 7", 0, 7), ("sun 20", 6, 20), ("thu 14", 3, 14)] {
            let occurrences = (0..DAYS_PER_WEEK)
                .flat_map(|d| hours().map(move |h| (d, h)))
                .filter(|&(d, h)| names(grid.cell(d, h)).contains(&expected))
                .collect::<Vec<_>>();

            assert_eq!(occurrences, vec![(day, hour)]);
        }
    }

    #[test]
    fn outside_hours_and_outside_week() {
        let events = vec![
            slot("21h", 2024, 6, 12, 21, 0),
            slot("last week", 2024, 6, 7, 10, 0),
            slot("next week", 2024, 6, 17, 10, 0),
        ];

        let grid = WeekGrid::build(Week::containing(date(2024, 6, 12), 0).unwrap(), &events);

        for day in 0..DAYS_PER_WEEK {
            for hour in hours() {
                assert!(grid.cell(day, hour).is_empty());
            }
        }
        assert_eq!(grid.events_in_week(), 1);
    }

    #[test]
    fn stacked_in_source_order() {
        let events = vec![
            slot("second", 2024, 6, 11, 10, 30),
            slot("first", 2024, 6, 11, 10, 0),
            slot("third", 2024, 6, 11, 10, 45),
        ];

        let grid = WeekGrid::build(Week::containing(date(2024, 6, 12), 0).unwrap(), &events);

        assert_eq!(names(grid.cell(1, 10)), vec!["second", "first", "third"]);
    }

    #[test]
    fn empty_week() {
        let events: Vec<Slot> = Vec::new();

        let grid = WeekGrid::build(Week::containing(date(2024, 6, 12), 0).unwrap(), &events);

        assert!(grid.is_empty());
        assert!(grid.cell(0, 7).is_empty());
    }

    #[test]
    fn cell_out_of_range() {
        let events = vec![slot("maths", 2024, 6, 12, 9, 30)];

        let grid = WeekGrid::build(Week::containing(date(2024, 6, 12), 0).unwrap(), &events);

        assert!(grid.cell(7, 9).is_empty());
        assert!(grid.cell(2, 6).is_empty());
        assert!(grid.cell(2, 21).is_empty());
    }
}
