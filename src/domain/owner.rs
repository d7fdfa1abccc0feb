//! Back-office records for the villa owner.
//!
//! The owner screens only read these tables. Booked days derived here are
//! what the guest calendar treats as unavailable.

use crate::domain::{
    Availability, DateRange, RateCalendar, RateKind, Rupiah, SpecialDate, days_between,
};
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
    Completed,
}

impl BookingStatus {
    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingGuest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: String,
}

impl BookingGuest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPricing {
    pub base_price: Rupiah,
    pub nights: u32,
    pub subtotal: Rupiah,
    pub discount: Rupiah,
    pub total: Rupiah,
}

impl BookingPricing {
    fn flat(base_price: Rupiah, nights: u32, discount: Rupiah) -> Self {
        let subtotal = base_price * nights as Rupiah;
        Self {
            base_price,
            nights,
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentProofRecord {
    pub image_url: String,
    pub uploaded_on: NaiveDate,
    pub transfer_date: NaiveDate,
    pub transfer_amount: Rupiah,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerBooking {
    pub id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub guest: BookingGuest,
    pub pricing: BookingPricing,
    pub payment_proof: Option<PaymentProofRecord>,
    pub status: BookingStatus,
    pub created_on: NaiveDate,
}

impl OwnerBooking {
    pub fn stay(&self) -> DateRange {
        DateRange::stay(self.start, self.end)
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Which list of the back office a booking sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingLane {
    Pending,
    Approved,
    Active,
    Previous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoUsage {
    pub code: String,
    pub discount_percentage: u32,
    pub affiliate: String,
    pub uses: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub booking_ids: Vec<String>,
    pub total_spent: Rupiah,
    pub last_booking: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub pending_count: usize,
    pub confirmed_count: usize,
    pub completed_count: usize,
    pub confirmed_revenue: Rupiah,
    pub month_revenue: Rupiah,
    pub month_bookings: usize,
    pub year_revenue: Rupiah,
    pub average_booking_value: Rupiah,
}

#[derive(Debug, Clone)]
pub struct BackOffice {
    pub pending: Vec<OwnerBooking>,
    pub approved: Vec<OwnerBooking>,
    pub active: Vec<OwnerBooking>,
    pub previous: Vec<OwnerBooking>,
    pub blocked_dates: Vec<NaiveDate>,
    pub rates: RateCalendar,
    pub promos: Vec<PromoUsage>,
    pub users: Vec<GuestAccount>,
}

impl BackOffice {
    pub fn lane(&self, lane: BookingLane) -> &[OwnerBooking] {
        match lane {
            BookingLane::Pending => &self.pending,
            BookingLane::Approved => &self.approved,
            BookingLane::Active => &self.active,
            BookingLane::Previous => &self.previous,
        }
    }

    /// Bookings that hold the villa: pending, approved and active.
    pub fn holding_bookings(&self) -> impl Iterator<Item = &OwnerBooking> {
        self.pending
            .iter()
            .chain(self.approved.iter())
            .chain(self.active.iter())
    }

    pub fn all_bookings(&self) -> impl Iterator<Item = &OwnerBooking> {
        self.holding_bookings().chain(self.previous.iter())
    }

    /// Every day of every holding booking, check-in and check-out included.
    pub fn booked_dates(&self) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = self
            .holding_bookings()
            .flat_map(|booking| days_between(booking.start, booking.end))
            .collect();
        days.sort();
        days.dedup();
        days
    }

    pub fn availability(&self) -> Availability {
        Availability::new(self.booked_dates(), self.blocked_dates.iter().copied())
    }

    pub fn booking_on(&self, date: NaiveDate) -> Option<&OwnerBooking> {
        self.holding_bookings().find(|booking| booking.covers(date))
    }

    pub fn dashboard(&self, today: NaiveDate) -> DashboardStats {
        let earning: Vec<&OwnerBooking> = self
            .all_bookings()
            .filter(|booking| {
                matches!(
                    booking.status,
                    BookingStatus::Confirmed | BookingStatus::Completed
                )
            })
            .collect();

        let confirmed_revenue: Rupiah = earning.iter().map(|b| b.pricing.total).sum();
        let in_month: Vec<&&OwnerBooking> = earning
            .iter()
            .filter(|b| b.start.year() == today.year() && b.start.month() == today.month())
            .collect();
        let year_revenue: Rupiah = earning
            .iter()
            .filter(|b| b.start.year() == today.year())
            .map(|b| b.pricing.total)
            .sum();

        DashboardStats {
            pending_count: self.pending.len(),
            confirmed_count: earning
                .iter()
                .filter(|b| b.status == BookingStatus::Confirmed)
                .count(),
            completed_count: earning
                .iter()
                .filter(|b| b.status == BookingStatus::Completed)
                .count(),
            confirmed_revenue,
            month_revenue: in_month.iter().map(|b| b.pricing.total).sum(),
            month_bookings: in_month.len(),
            year_revenue,
            average_booking_value: if earning.is_empty() {
                0
            } else {
                confirmed_revenue / earning.len() as Rupiah
            },
        }
    }

    /// The villa's demo back office.
    pub fn sample() -> Self {
        let booking = |id: &str,
                       (start, end): (NaiveDate, NaiveDate),
                       guest: (&str, &str, &str, &str, &str),
                       discount: Rupiah,
                       status: BookingStatus,
                       created_on: NaiveDate| {
            let nights = (end - start).num_days().max(0) as u32;
            OwnerBooking {
                id: id.to_string(),
                start,
                end,
                guest: BookingGuest {
                    first_name: guest.0.to_string(),
                    last_name: guest.1.to_string(),
                    email: guest.2.to_string(),
                    phone: guest.3.to_string(),
                    special_requests: guest.4.to_string(),
                },
                pricing: BookingPricing::flat(SAMPLE_BASE_PRICE, nights, discount),
                payment_proof: None,
                status,
                created_on,
            }
        };

        let mut first_pending = booking(
            "BK001",
            (day(2025, 3, 15), day(2025, 3, 20)),
            ("John", "Doe", "john.doe@example.com", "+1234567890", "Early check-in if possible"),
            2_500_000,
            BookingStatus::Pending,
            day(2025, 3, 1),
        );
        first_pending.payment_proof = Some(PaymentProofRecord {
            image_url: "https://via.placeholder.com/400x300".to_string(),
            uploaded_on: day(2025, 3, 1),
            transfer_date: day(2025, 2, 28),
            transfer_amount: 22_500_000,
        });

        let active = vec![
            booking(
                "BK002",
                (day(2025, 1, 10), day(2025, 1, 15)),
                ("Sarah", "Johnson", "sarah.j@example.com", "+1234567891", ""),
                0,
                BookingStatus::Confirmed,
                day(2025, 1, 1),
            ),
            booking(
                "BK007",
                (day(2025, 1, 20), day(2025, 1, 27)),
                ("Robert", "Martinez", "robert.m@example.com", "+1234567895", "Celebrating anniversary"),
                3_500_000,
                BookingStatus::Confirmed,
                day(2025, 1, 5),
            ),
            booking(
                "BK008",
                (day(2025, 2, 1), day(2025, 2, 5)),
                ("Lisa", "Anderson", "lisa.a@example.com", "+1234567896", "Vegetarian meals preferred"),
                0,
                BookingStatus::Confirmed,
                day(2025, 1, 15),
            ),
        ];

        let approved = vec![
            booking(
                "BK005",
                (day(2025, 2, 10), day(2025, 2, 15)),
                ("David", "Wilson", "david.w@example.com", "+1234567894", ""),
                0,
                BookingStatus::Confirmed,
                day(2025, 1, 5),
            ),
            booking(
                "BK006",
                (day(2025, 2, 20), day(2025, 2, 25)),
                ("Jennifer", "Brown", "jennifer.b@example.com", "+1234567897", "Birthday celebration"),
                2_500_000,
                BookingStatus::Confirmed,
                day(2025, 2, 1),
            ),
            booking(
                "BK009",
                (day(2025, 3, 5), day(2025, 3, 10)),
                ("Thomas", "Lee", "thomas.l@example.com", "+1234567898", ""),
                0,
                BookingStatus::Confirmed,
                day(2025, 2, 15),
            ),
        ];

        let previous = vec![
            booking(
                "BK003",
                (day(2024, 12, 20), day(2024, 12, 27)),
                ("Michael", "Chen", "michael.chen@example.com", "+1234567892", ""),
                3_500_000,
                BookingStatus::Completed,
                day(2024, 12, 10),
            ),
            booking(
                "BK004",
                (day(2024, 11, 15), day(2024, 11, 20)),
                ("Emily", "Davis", "emily.d@example.com", "+1234567893", ""),
                2_500_000,
                BookingStatus::Completed,
                day(2024, 11, 1),
            ),
        ];

        let special = |id, name: &str, start, end, price, kind| SpecialDate {
            id,
            name: name.to_string(),
            start,
            end,
            price,
            kind,
        };
        let rates = RateCalendar::new(SAMPLE_BASE_PRICE, 1.3)
            .with_special(special(1, "New Year 2025", day(2025, 1, 1), day(2025, 1, 1), 10_000_000, RateKind::Holiday))
            .with_special(special(2, "Chinese New Year", day(2025, 1, 29), day(2025, 1, 31), 8_000_000, RateKind::Holiday))
            .with_special(special(3, "Valentine Week", day(2025, 2, 14), day(2025, 2, 16), 7_000_000, RateKind::Special))
            .with_special(special(4, "Easter Weekend", day(2025, 4, 18), day(2025, 4, 21), 7_500_000, RateKind::Holiday))
            .with_special(special(5, "Summer Peak Season", day(2025, 7, 1), day(2025, 8, 31), 6_500_000, RateKind::Season))
            .with_special(special(6, "Christmas & New Year", day(2025, 12, 24), day(2026, 1, 5), 12_000_000, RateKind::Holiday));

        let promos = vec![
            PromoUsage {
                code: "TRAVEL10".to_string(),
                discount_percentage: 10,
                affiliate: "TravelBlogger123".to_string(),
                uses: 5,
            },
            PromoUsage {
                code: "SUMMER25".to_string(),
                discount_percentage: 25,
                affiliate: "SummerVibes".to_string(),
                uses: 2,
            },
        ];

        let pending = vec![first_pending];
        let mut office = Self {
            pending,
            approved,
            active,
            previous,
            blocked_dates: vec![day(2025, 1, 28), day(2025, 1, 29), day(2025, 1, 30)],
            rates,
            promos,
            users: Vec::new(),
        };
        office.users = office.derive_users();
        office
    }

    /// One account per guest email, in booking-id order.
    fn derive_users(&self) -> Vec<GuestAccount> {
        let mut bookings: Vec<&OwnerBooking> = self.all_bookings().collect();
        bookings.sort_by(|a, b| a.id.cmp(&b.id));

        let mut users: Vec<GuestAccount> = Vec::new();
        for booking in bookings {
            match users.iter_mut().find(|u| u.email == booking.guest.email) {
                Some(user) => {
                    user.booking_ids.push(booking.id.clone());
                    user.total_spent += booking.pricing.total;
                    user.last_booking = user.last_booking.max(booking.start);
                }
                None => users.push(GuestAccount {
                    id: format!("U{:03}", users.len() + 1),
                    name: booking.guest.full_name(),
                    email: booking.guest.email.clone(),
                    phone: booking.guest.phone.clone(),
                    booking_ids: vec![booking.id.clone()],
                    total_spent: booking.pricing.total,
                    last_booking: booking.start,
                }),
            }
        }
        users
    }
}

const SAMPLE_BASE_PRICE: Rupiah = 5_000_000;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DayStatus;

    #[test]
    fn sample_pricing_matches_nights() {
        let office = BackOffice::sample();
        let bk007 = office.active.iter().find(|b| b.id == "BK007").unwrap();
        assert_eq!(bk007.pricing.nights, 7);
        assert_eq!(bk007.pricing.subtotal, 35_000_000);
        assert_eq!(bk007.pricing.total, 31_500_000);
        assert_eq!(office.pending[0].pricing.total, 22_500_000);
    }

    #[test]
    fn holding_bookings_make_days_unavailable() {
        let office = BackOffice::sample();
        let availability = office.availability();
        let today = day(2025, 1, 1);

        // both ends of BK002 are held
        assert_eq!(availability.classify(day(2025, 1, 10), today), DayStatus::Booked);
        assert_eq!(availability.classify(day(2025, 1, 15), today), DayStatus::Booked);
        assert_eq!(availability.classify(day(2025, 1, 16), today), DayStatus::Available);
        assert_eq!(availability.classify(day(2025, 1, 28), today), DayStatus::Blocked);
        // previous stays do not block anything
        assert!(!office.booked_dates().contains(&day(2024, 12, 21)));
    }

    #[test]
    fn booking_lookup_by_day() {
        let office = BackOffice::sample();
        assert_eq!(office.booking_on(day(2025, 3, 17)).map(|b| b.id.as_str()), Some("BK001"));
        assert!(office.booking_on(day(2025, 4, 1)).is_none());
    }

    #[test]
    fn dashboard_counts_confirmed_and_completed() {
        let office = BackOffice::sample();
        let stats = office.dashboard(day(2025, 2, 10));

        assert_eq!(stats.pending_count, 1);
        assert_eq!(stats.confirmed_count, 6);
        assert_eq!(stats.completed_count, 2);
        // BK008 + BK005 + BK006 start in February
        assert_eq!(stats.month_bookings, 3);
        assert_eq!(stats.month_revenue, 20_000_000 + 25_000_000 + 22_500_000);
        assert_eq!(stats.average_booking_value, stats.confirmed_revenue / 8);
    }

    #[test]
    fn users_are_derived_per_guest() {
        let office = BackOffice::sample();
        assert_eq!(office.users.len(), 9);
        let john = office.users.iter().find(|u| u.name == "John Doe").unwrap();
        assert_eq!(john.id, "U001");
        assert_eq!(john.booking_ids, vec!["BK001".to_string()]);
        assert_eq!(john.total_spent, 22_500_000);
    }
}
