use crate::domain::Rupiah;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Language of guest-facing text. Indonesian is the default site language,
/// English lives under the `/en` prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Indonesian,
    English,
}

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

impl Locale {
    pub fn month_name(self, month: u32) -> &'static str {
        let index = (month.clamp(1, 12) - 1) as usize;
        match self {
            Locale::Indonesian => MONTHS_ID[index],
            Locale::English => MONTHS_EN[index],
        }
    }

    /// Route prefix for this locale.
    pub fn prefix(self) -> &'static str {
        match self {
            Locale::Indonesian => "",
            Locale::English => "/en",
        }
    }
}

/// `1 March 2025` / `1 Maret 2025`.
pub fn long_date(date: NaiveDate, locale: Locale) -> String {
    format!(
        "{} {} {}",
        date.day(),
        locale.month_name(date.month()),
        date.year()
    )
}

/// `1 Maret 2025, 14:05`.
pub fn long_timestamp(timestamp: NaiveDateTime, locale: Locale) -> String {
    format!(
        "{}, {}",
        long_date(timestamp.date(), locale),
        timestamp.format("%H:%M")
    )
}

/// `IDR 2.000.000`, grouped with dots the way rupiah amounts are written.
pub fn format_idr(amount: Rupiah) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("IDR {grouped}")
}

pub fn nights_label(nights: i64, locale: Locale) -> String {
    match locale {
        Locale::Indonesian => format!("{nights} malam"),
        Locale::English if nights == 1 => "1 night".to_string(),
        Locale::English => format!("{nights} nights"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupiah_grouping() {
        assert_eq!(format_idr(0), "IDR 0");
        assert_eq!(format_idr(999), "IDR 999");
        assert_eq!(format_idr(2_000_000), "IDR 2.000.000");
        assert_eq!(format_idr(12_500), "IDR 12.500");
    }

    #[test]
    fn long_dates_per_locale() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap();
        assert_eq!(long_date(date, Locale::English), "17 August 2025");
        assert_eq!(long_date(date, Locale::Indonesian), "17 Agustus 2025");

        let ts = date.and_hms_opt(9, 5, 0).unwrap();
        assert_eq!(long_timestamp(ts, Locale::Indonesian), "17 Agustus 2025, 09:05");
    }

    #[test]
    fn night_labels() {
        assert_eq!(nights_label(1, Locale::English), "1 night");
        assert_eq!(nights_label(3, Locale::English), "3 nights");
        assert_eq!(nights_label(3, Locale::Indonesian), "3 malam");
    }
}
