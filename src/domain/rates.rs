use crate::domain::{Rupiah, is_weekend};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateKind {
    Base,
    Weekend,
    Holiday,
    Special,
    Season,
}

impl RateKind {
    pub fn label(self) -> &'static str {
        match self {
            RateKind::Base => "Base",
            RateKind::Weekend => "Weekend",
            RateKind::Holiday => "Holiday",
            RateKind::Special => "Special",
            RateKind::Season => "Season",
        }
    }
}

/// A named date span with its own nightly price.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialDate {
    pub id: u32,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub price: Rupiah,
    pub kind: RateKind,
}

impl SpecialDate {
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The owner's nightly price list: special dates first, then the weekend
/// surcharge, then the base price.
#[derive(Debug, Clone, PartialEq)]
pub struct RateCalendar {
    pub base_price: Rupiah,
    pub weekend_multiplier: f64,
    pub special_dates: Vec<SpecialDate>,
}

impl RateCalendar {
    pub fn new(base_price: Rupiah, weekend_multiplier: f64) -> Self {
        Self {
            base_price,
            weekend_multiplier,
            special_dates: Vec::new(),
        }
    }

    pub fn with_special(mut self, special: SpecialDate) -> Self {
        self.special_dates.push(special);
        self
    }

    /// First listed special date wins when spans overlap.
    pub fn special_for(&self, date: NaiveDate) -> Option<&SpecialDate> {
        self.special_dates.iter().find(|special| special.covers(date))
    }

    pub fn rate_for(&self, date: NaiveDate) -> Rupiah {
        if let Some(special) = self.special_for(date) {
            return special.price;
        }

        if is_weekend(date) {
            (self.base_price as f64 * self.weekend_multiplier).round() as Rupiah
        } else {
            self.base_price
        }
    }

    pub fn rate_kind(&self, date: NaiveDate) -> RateKind {
        match self.special_for(date) {
            Some(special) => special.kind,
            None if is_weekend(date) => RateKind::Weekend,
            None => RateKind::Base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn calendar() -> RateCalendar {
        RateCalendar::new(5_000_000, 1.3).with_special(SpecialDate {
            id: 2,
            name: "Chinese New Year".to_string(),
            start: d(2025, 1, 29),
            end: d(2025, 1, 31),
            price: 8_000_000,
            kind: RateKind::Holiday,
        })
    }

    #[test]
    fn weekday_uses_base_price() {
        // 2025-01-07 is a Tuesday
        assert_eq!(calendar().rate_for(d(2025, 1, 7)), 5_000_000);
        assert_eq!(calendar().rate_kind(d(2025, 1, 7)), RateKind::Base);
    }

    #[test]
    fn weekend_applies_multiplier() {
        // 2025-01-11 is a Saturday
        assert_eq!(calendar().rate_for(d(2025, 1, 11)), 6_500_000);
        assert_eq!(calendar().rate_kind(d(2025, 1, 12)), RateKind::Weekend);
    }

    #[test]
    fn special_dates_override_weekends() {
        let rates = calendar();
        assert_eq!(rates.rate_for(d(2025, 1, 29)), 8_000_000);
        assert_eq!(rates.rate_kind(d(2025, 1, 31)), RateKind::Holiday);
        // 2025-02-01 is a Saturday right after the holiday
        assert_eq!(rates.rate_kind(d(2025, 2, 1)), RateKind::Weekend);
    }
}
