use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Check-in and check-out days of a stay. Either side may be unset while the
/// guest is still picking dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl DateRange {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a complete range, swapping the endpoints if they arrive reversed.
    pub fn stay(first: NaiveDate, second: NaiveDate) -> Self {
        let (check_in, check_out) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };

        Self {
            check_in: Some(check_in),
            check_out: Some(check_out),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }

    pub fn endpoints(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.check_in?, self.check_out?))
    }

    /// Nights between check-in and check-out, zero while incomplete.
    pub fn nights(&self) -> i64 {
        self.endpoints()
            .map(|(check_in, check_out)| (check_out - check_in).num_days())
            .unwrap_or(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.endpoints()
            .is_some_and(|(check_in, check_out)| date >= check_in && date <= check_out)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let (start, end) = match self.endpoints() {
            Some(bounds) => bounds,
            // start > end yields nothing
            None => (NaiveDate::MAX, NaiveDate::MIN),
        };
        days_between(start, end)
    }
}

/// Every calendar day from `start` to `end`, both inclusive.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let span = if end >= start {
        (end - start).num_days()
    } else {
        -1
    };
    (0..=span).map(move |i| start + Duration::days(i))
}

/// First and last day of a month, `None` for an invalid year/month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    Some((start, next.pred_opt()?))
}

/// Start of the Sunday-first week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_since_sunday = date.weekday().num_days_from_sunday();
    date - Duration::days(days_since_sunday as i64)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Sunday-first weeks covering the whole month, padded with days of the
/// neighbouring months.
pub fn month_weeks(year: i32, month: u32) -> Vec<[NaiveDate; 7]> {
    let Some((first, last)) = month_bounds(year, month) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut cursor = week_start(first);
    while cursor <= last {
        let start = cursor;
        weeks.push(std::array::from_fn(|i| start + Duration::days(i as i64)));
        cursor += Duration::weeks(1);
    }
    weeks
}

/// Same day of the month `offset` months away, clamped to the month's end.
pub fn shift_months(date: NaiveDate, offset: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + offset;
    let (year, month) = (total.div_euclid(12), total.rem_euclid(12) as u32 + 1);

    match month_bounds(year, month) {
        Some((_, last)) => {
            let day = date.day().min(last.day());
            NaiveDate::from_ymd_opt(year, month, day).unwrap_or(last)
        }
        None => date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn nights_count_calendar_days() {
        let range = DateRange::stay(d(2025, 3, 1), d(2025, 3, 5));
        assert_eq!(range.nights(), 4);
        assert_eq!(range.days().count(), 5);
    }

    #[test]
    fn stay_orders_endpoints() {
        let range = DateRange::stay(d(2025, 3, 5), d(2025, 3, 1));
        assert_eq!(range.check_in, Some(d(2025, 3, 1)));
        assert_eq!(range.check_out, Some(d(2025, 3, 5)));
    }

    #[test]
    fn incomplete_range_has_no_nights_or_days() {
        let range = DateRange {
            check_in: Some(d(2025, 3, 1)),
            check_out: None,
        };
        assert_eq!(range.nights(), 0);
        assert_eq!(range.days().count(), 0);
        assert!(!range.contains(d(2025, 3, 1)));
    }

    #[test]
    fn days_between_crosses_month_boundary() {
        let days: Vec<_> = days_between(d(2025, 2, 27), d(2025, 3, 2)).collect();
        assert_eq!(
            days,
            vec![d(2025, 2, 27), d(2025, 2, 28), d(2025, 3, 1), d(2025, 3, 2)]
        );
        assert_eq!(days_between(d(2025, 3, 2), d(2025, 3, 1)).count(), 0);
    }

    #[test]
    fn month_bounds_handles_december_and_leap_years() {
        assert_eq!(month_bounds(2024, 12), Some((d(2024, 12, 1), d(2024, 12, 31))));
        assert_eq!(month_bounds(2024, 2), Some((d(2024, 2, 1), d(2024, 2, 29))));
        assert_eq!(month_bounds(2024, 13), None);
    }

    #[test]
    fn month_weeks_start_on_sunday_and_cover_month() {
        // March 2025 starts on a Saturday
        let weeks = month_weeks(2025, 3);
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0][0], d(2025, 2, 23));
        assert_eq!(weeks[0][6], d(2025, 3, 1));
        assert_eq!(weeks[5][1], d(2025, 3, 31));
    }

    #[test]
    fn shift_months_clamps_day() {
        assert_eq!(shift_months(d(2025, 1, 31), 1), d(2025, 2, 28));
        assert_eq!(shift_months(d(2025, 1, 15), -1), d(2024, 12, 15));
        assert_eq!(shift_months(d(2025, 11, 30), 14), d(2027, 1, 30));
    }
}
