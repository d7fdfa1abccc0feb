use crate::domain::{Availability, DateRange, days_between};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Days the guest has picked on the booking calendar.
///
/// Ordered and unique by calendar day. Every transition goes through
/// [`SelectedDates::toggle`], which keeps the set contiguous once it holds
/// two or more days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedDates(BTreeSet<NaiveDate>);

impl SelectedDates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_days(days: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self(days.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.0.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<NaiveDate> {
        self.iter().collect()
    }

    pub fn is_contiguous(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => (last - first).num_days() + 1 == self.len() as i64,
            _ => true,
        }
    }

    /// Check-in/check-out derived from the selection. Both stay unset until
    /// at least two days are selected.
    pub fn date_range(&self) -> DateRange {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) if self.len() >= 2 => DateRange::stay(first, last),
            _ => DateRange::empty(),
        }
    }

    pub fn nights(&self) -> i64 {
        self.date_range().nights()
    }

    /// Strictly between the endpoints but not itself selected.
    pub fn is_in_range(&self, date: NaiveDate) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) if self.len() >= 2 => {
                date > first && date < last && !self.contains(date)
            }
            _ => false,
        }
    }

    /// Applies one calendar click to the selection and returns the new set.
    ///
    /// Clicking a day that is past, booked or blocked changes nothing.
    /// Clicking an unselected day grows the selection to the full span from
    /// the earliest to the latest day, filling every gap. Clicking a selected
    /// day shrinks: the first day trims from the left, the last day trims
    /// from the right, and an interior day keeps only the days before it.
    pub fn toggle(&self, date: NaiveDate, availability: &Availability, today: NaiveDate) -> Self {
        if !availability.is_selectable(date, today) {
            return self.clone();
        }

        if !self.contains(date) {
            return self.extend_to(date);
        }

        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return Self::new();
        };

        if date == first {
            self.iter().filter(|d| *d > date).collect()
        } else if date == last {
            Self(self.0.range(..date).copied().collect())
        } else {
            // interior removal drops the right-hand remainder, it never splits
            Self(self.0.range(..date).copied().collect())
        }
    }

    fn extend_to(&self, date: NaiveDate) -> Self {
        let first = self.first().map_or(date, |first| first.min(date));
        let last = self.last().map_or(date, |last| last.max(date));
        Self::from_days(days_between(first, last))
    }
}

impl FromIterator<NaiveDate> for SelectedDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self::from_days(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2025, 2, 1)
    }

    fn march(days: std::ops::RangeInclusive<u32>) -> SelectedDates {
        days.map(|day| d(2025, 3, day)).collect()
    }

    #[test]
    fn first_click_selects_single_day() {
        let selection = SelectedDates::new().toggle(d(2025, 3, 3), &Availability::open(), today());
        assert_eq!(selection.to_vec(), vec![d(2025, 3, 3)]);
        assert!(!selection.date_range().is_complete());
        assert_eq!(selection.nights(), 0);
    }

    #[test]
    fn second_click_fills_the_gap() {
        let availability = Availability::open();
        let selection = SelectedDates::new()
            .toggle(d(2025, 3, 1), &availability, today())
            .toggle(d(2025, 3, 5), &availability, today());

        assert_eq!(selection, march(1..=5));
        assert_eq!(selection.date_range(), DateRange::stay(d(2025, 3, 1), d(2025, 3, 5)));
        assert_eq!(selection.nights(), 4);
    }

    #[test]
    fn clicking_before_the_range_extends_left() {
        let selection = march(5..=7).toggle(d(2025, 3, 2), &Availability::open(), today());
        assert_eq!(selection, march(2..=7));
    }

    #[test]
    fn removing_first_day_shrinks_from_left() {
        let selection = march(1..=5).toggle(d(2025, 3, 1), &Availability::open(), today());
        assert_eq!(selection, march(2..=5));
    }

    #[test]
    fn removing_last_day_shrinks_from_right() {
        let selection = march(1..=5).toggle(d(2025, 3, 5), &Availability::open(), today());
        assert_eq!(selection, march(1..=4));
    }

    #[test]
    fn removing_interior_day_keeps_left_remainder() {
        let selection = march(1..=5).toggle(d(2025, 3, 3), &Availability::open(), today());
        assert_eq!(selection.to_vec(), vec![d(2025, 3, 1), d(2025, 3, 2)]);
    }

    #[test]
    fn removing_only_day_empties_selection() {
        let selection = march(4..=4).toggle(d(2025, 3, 4), &Availability::open(), today());
        assert!(selection.is_empty());
    }

    #[test]
    fn unavailable_days_are_ignored() {
        let availability = Availability::new([d(2025, 3, 8)], [d(2025, 3, 9)]);
        let selection = march(1..=5);

        assert_eq!(selection.toggle(d(2025, 3, 8), &availability, today()), selection);
        assert_eq!(selection.toggle(d(2025, 3, 9), &availability, today()), selection);
        assert_eq!(
            selection.toggle(d(2025, 1, 20), &availability, today()),
            selection
        );
    }

    #[test]
    fn disabled_click_on_selected_day_does_not_remove_it() {
        // selected before the owner blocked it
        let availability = Availability::new(Vec::new(), [d(2025, 3, 3)]);
        let selection = march(1..=5);
        assert_eq!(selection.toggle(d(2025, 3, 3), &availability, today()), selection);
    }

    #[test]
    fn contiguity_holds_for_any_toggle_sequence() {
        let availability = Availability::new([d(2025, 3, 20)], [d(2025, 3, 21)]);
        let clicks = [
            3u32, 9, 1, 9, 5, 12, 20, 7, 1, 2, 15, 21, 15, 6, 4, 4, 30, 10, 10, 3, 28, 29, 31,
            11, 6,
        ];

        let mut selection = SelectedDates::new();
        for day in clicks {
            let before = selection.clone();
            selection = selection.toggle(d(2025, 3, day), &availability, today());
            assert!(
                selection.is_contiguous(),
                "gap after clicking {day}: {:?}",
                selection.to_vec()
            );

            // growth only ever happens for days outside the current span
            if selection.len() > before.len() {
                let span = before.date_range();
                assert!(!span.contains(d(2025, 3, day)));
            }
        }
    }

    #[test]
    fn in_range_excludes_endpoints_and_outside_days() {
        let selection = march(1..=5);
        assert!(!selection.is_in_range(d(2025, 3, 1)));
        assert!(!selection.is_in_range(d(2025, 3, 6)));
        assert!(!SelectedDates::from_days([d(2025, 3, 1)]).is_in_range(d(2025, 3, 1)));
        assert!(!selection.is_in_range(d(2025, 3, 3)));
        assert!(SelectedDates::from_days([d(2025, 3, 1), d(2025, 3, 5)]).is_in_range(d(2025, 3, 3)));
    }

    #[test]
    fn serializes_as_iso_day_list() {
        let json = serde_json::to_string(&march(1..=2)).unwrap();
        assert_eq!(json, r#"["2025-03-01","2025-03-02"]"#);
        let back: SelectedDates = serde_json::from_str(&json).unwrap();
        assert_eq!(back, march(1..=2));
    }
}
