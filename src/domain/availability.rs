use chrono::NaiveDate;
use std::collections::BTreeSet;

/// What the booking calendar can say about a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayStatus {
    Past,
    Booked,
    Blocked,
    Available,
}

impl DayStatus {
    pub fn is_selectable(self) -> bool {
        self == DayStatus::Available
    }

    pub fn label(self) -> &'static str {
        match self {
            DayStatus::Past => "past",
            DayStatus::Booked => "booked",
            DayStatus::Blocked => "blocked",
            DayStatus::Available => "available",
        }
    }
}

/// Classifies `date` against the unavailable days and `today`.
///
/// Past wins over booked, booked over blocked. Only selectability is
/// observable to callers, so the order just keeps the answer stable.
pub fn classify(
    date: NaiveDate,
    booked: &BTreeSet<NaiveDate>,
    blocked: &BTreeSet<NaiveDate>,
    today: NaiveDate,
) -> DayStatus {
    if date < today {
        DayStatus::Past
    } else if booked.contains(&date) {
        DayStatus::Booked
    } else if blocked.contains(&date) {
        DayStatus::Blocked
    } else {
        DayStatus::Available
    }
}

/// Read-only booked/blocked days supplied to the booking flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    booked: BTreeSet<NaiveDate>,
    blocked: BTreeSet<NaiveDate>,
}

impl Availability {
    pub fn new(
        booked: impl IntoIterator<Item = NaiveDate>,
        blocked: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        Self {
            booked: booked.into_iter().collect(),
            blocked: blocked.into_iter().collect(),
        }
    }

    /// Nothing booked, nothing blocked.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn booked(&self) -> &BTreeSet<NaiveDate> {
        &self.booked
    }

    pub fn blocked(&self) -> &BTreeSet<NaiveDate> {
        &self.blocked
    }

    pub fn classify(&self, date: NaiveDate, today: NaiveDate) -> DayStatus {
        classify(date, &self.booked, &self.blocked, today)
    }

    pub fn is_selectable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.classify(date, today).is_selectable()
    }

    /// Booked or blocked days inside `[start, end]`.
    pub fn unavailable_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        if end < start {
            return Vec::new();
        }

        let mut days: Vec<NaiveDate> = self
            .booked
            .range(start..=end)
            .chain(self.blocked.range(start..=end))
            .copied()
            .collect();
        days.sort();
        days.dedup();
        days
    }
}
