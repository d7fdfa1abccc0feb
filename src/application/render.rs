use crate::application::tui::Theme;
use crate::application::{Confirmation, ReviewSummary};
use crate::domain::{
    BackOffice, BankAccount, BookingDraft, BookingLane, DashboardStats, DayStatus, Locale,
    PromoCatalog, RateKind, format_idr, long_date, month_weeks, nights_label,
};
use chrono::{Datelike, NaiveDate};
use std::fmt::{self, Write};

/// Plain-text views for the command line.
pub struct TextRenderer {
    theme: Option<Theme>,
}

impl TextRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme: Some(theme) }
    }

    /// No escape codes, for pipes and tests.
    pub fn plain() -> Self {
        Self { theme: None }
    }

    fn heading(&self, text: &str) -> String {
        match &self.theme {
            Some(theme) => theme.colors.header.colorize_bold(text),
            None => text.to_string(),
        }
    }

    fn highlight(&self, text: &str) -> String {
        match &self.theme {
            Some(theme) => theme.colors.accent.colorize(text),
            None => text.to_string(),
        }
    }

    pub fn render_draft(
        &self,
        draft: &BookingDraft,
        base_price: u64,
    ) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "{}", self.heading("=== Your stay ==="))?;

        match draft.date_range.endpoints() {
            Some((check_in, check_out)) => {
                writeln!(out, "Check-in:  {}", long_date(check_in, Locale::English))?;
                writeln!(out, "Check-out: {}", long_date(check_out, Locale::English))?;
                writeln!(out, "Duration:  {}", nights_label(draft.nights(), Locale::English))?;
            }
            None => match draft.selected_dates.first() {
                Some(day) => {
                    writeln!(out, "Selected:  {day} (pick a check-out day)")?;
                }
                None => {
                    writeln!(out, "No dates selected")?;
                }
            },
        }

        writeln!(out, "Rate:      {} / night", format_idr(base_price))?;
        if draft.has_stay() {
            let pricing = draft.pricing;
            self.write_pricing(
                &mut out,
                pricing.original_price,
                pricing.discount_amount,
                pricing.final_price,
            )?;
        }

        match &draft.applied_promo {
            Some(promo) => {
                writeln!(out, "Promo:     {} ({}% off)", promo.code, promo.discount_percentage)?;
            }
            None if !draft.promo_code.is_empty() => {
                writeln!(out, "Promo:     {} is not valid", draft.promo_code)?;
            }
            None => {}
        }
        Ok(out)
    }

    fn write_pricing(
        &self,
        out: &mut String,
        original: u64,
        discount: u64,
        total: u64,
    ) -> fmt::Result {
        writeln!(out, "Subtotal:  {}", format_idr(original))?;
        if discount > 0 {
            writeln!(out, "Discount: -{}", format_idr(discount))?;
        }
        writeln!(out, "Total:     {}", self.highlight(&format_idr(total)))
    }

    pub fn render_review(
        &self,
        summary: &ReviewSummary,
        bank: &BankAccount,
    ) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let guest = &summary.guest;

        writeln!(out, "{}", self.heading("=== Review your booking ==="))?;
        writeln!(out, "Check-in:  {}", long_date(summary.check_in, Locale::English))?;
        writeln!(out, "Check-out: {}", long_date(summary.check_out, Locale::English))?;
        writeln!(out, "Duration:  {}", nights_label(summary.nights, Locale::English))?;

        writeln!(out, "\n{}", self.heading("Guest"))?;
        writeln!(out, "Name:      {}", guest.full_name)?;
        writeln!(out, "Phone:     {}", guest.phone)?;
        if !guest.email.is_empty() {
            writeln!(out, "Email:     {}", guest.email)?;
        }
        writeln!(out, "Address:   {}", guest.location_line())?;
        writeln!(out, "Guests:    {}", guest.number_of_guests)?;
        writeln!(out, "Extra bed: {}", guest.extra_bed_label())?;
        if !guest.check_in_time.is_empty() {
            writeln!(out, "Arrival:   {}", guest.check_in_time)?;
        }
        if !guest.special_requests.is_empty() {
            writeln!(out, "Requests:  {}", guest.special_requests)?;
        }

        writeln!(out, "\n{}", self.heading("Price"))?;
        if let Some(promo) = &summary.promo {
            writeln!(out, "Promo:     {} ({}% off)", promo.code, promo.discount_percentage)?;
        }
        self.write_pricing(
            &mut out,
            summary.pricing.original_price,
            summary.pricing.discount_amount,
            summary.pricing.final_price,
        )?;

        writeln!(out, "\n{}", self.heading("Bank transfer"))?;
        writeln!(out, "{} {} a.n. {}", bank.bank_name, bank.account_number, bank.account_name)?;
        Ok(out)
    }

    pub fn render_confirmation(&self, confirmation: &Confirmation) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "{}", self.heading("=== Booking received ==="))?;
        writeln!(out, "Reference: {}", self.highlight(&confirmation.reference))?;
        writeln!(out, "Guest:     {}", confirmation.guest.full_name)?;
        writeln!(
            out,
            "Stay:      {} - {} ({})",
            long_date(confirmation.check_in, Locale::English),
            long_date(confirmation.check_out, Locale::English),
            nights_label(confirmation.nights, Locale::English)
        )?;
        writeln!(out, "Total:     {}", format_idr(confirmation.pricing.final_price))?;
        Ok(out)
    }

    pub fn render_dashboard(&self, stats: &DashboardStats) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "{}", self.heading("=== Dashboard ==="))?;
        writeln!(out, "Pending approval:  {}", stats.pending_count)?;
        writeln!(out, "Confirmed:         {}", stats.confirmed_count)?;
        writeln!(out, "Completed:         {}", stats.completed_count)?;
        writeln!(out, "Revenue (total):   {}", format_idr(stats.confirmed_revenue))?;
        writeln!(out, "Revenue (year):    {}", format_idr(stats.year_revenue))?;
        writeln!(
            out,
            "Revenue (month):   {} from {} booking(s)",
            format_idr(stats.month_revenue),
            stats.month_bookings
        )?;
        writeln!(out, "Average booking:   {}", format_idr(stats.average_booking_value))?;
        Ok(out)
    }

    pub fn render_bookings(&self, office: &BackOffice) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let lanes = [
            (BookingLane::Pending, "Pending"),
            (BookingLane::Active, "Active"),
            (BookingLane::Approved, "Approved"),
            (BookingLane::Previous, "Previous"),
        ];

        for (lane, title) in lanes {
            let bookings = office.lane(lane);
            writeln!(out, "{}", self.heading(&format!("{title} ({})", bookings.len())))?;
            for booking in bookings {
                writeln!(
                    out,
                    "  {}  {} -> {}  {:<20} {:>16}  {}{}",
                    booking.id,
                    booking.start,
                    booking.end,
                    booking.guest.full_name(),
                    format_idr(booking.pricing.total),
                    booking.status.label(),
                    if booking.payment_proof.is_some() { "  [proof]" } else { "" }
                )?;
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Month grid marking booked (`B`) and blocked (`X`) days.
    pub fn render_availability_month(
        &self,
        office: &BackOffice,
        year: i32,
        month: u32,
    ) -> Result<String, fmt::Error> {
        let availability = office.availability();
        self.month_grid(year, month, |date| {
            match availability.classify(date, NaiveDate::MIN) {
                DayStatus::Booked => format!("{:>2}B", date.day()),
                DayStatus::Blocked => format!("{:>2}X", date.day()),
                _ => format!("{:>2} ", date.day()),
            }
        })
    }

    /// Month grid of nightly rates in thousands of rupiah.
    pub fn render_rate_month(
        &self,
        office: &BackOffice,
        year: i32,
        month: u32,
    ) -> Result<String, fmt::Error> {
        let rates = &office.rates;
        let mut out = self.month_grid(year, month, |date| {
            let marker = match rates.rate_kind(date) {
                RateKind::Base => ' ',
                RateKind::Weekend => 'w',
                RateKind::Holiday => 'h',
                RateKind::Special => 's',
                RateKind::Season => 'p',
            };
            format!("{:>2}{}{:>6}", date.day(), marker, rates.rate_for(date) / 1000)
        })?;

        writeln!(out, "\nBase {} / night, weekend x{}", format_idr(rates.base_price), rates.weekend_multiplier)?;
        for special in &rates.special_dates {
            writeln!(
                out,
                "  {:<22} {} -> {}  {:>16}  {}",
                special.name,
                special.start,
                special.end,
                format_idr(special.price),
                special.kind.label()
            )?;
        }
        Ok(out)
    }

    fn month_grid<F>(&self, year: i32, month: u32, cell: F) -> Result<String, fmt::Error>
    where
        F: Fn(NaiveDate) -> String,
    {
        let mut out = String::new();
        writeln!(out, "{}", self.heading(&format!("{} {}", Locale::English.month_name(month), year)))?;

        let weeks = month_weeks(year, month);
        let width = weeks
            .first()
            .and_then(|week| week.first())
            .map_or(3, |&date| cell(date).chars().count());

        let names = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        let header: Vec<String> = names.iter().map(|n| format!("{n:>width$}")).collect();
        writeln!(out, "{}", header.join(" "))?;

        for week in weeks {
            let cells: Vec<String> = week
                .iter()
                .map(|&date| {
                    if date.month() == month {
                        cell(date)
                    } else {
                        " ".repeat(width)
                    }
                })
                .collect();
            writeln!(out, "{}", cells.join(" ").trim_end())?;
        }
        Ok(out)
    }

    pub fn render_promos(
        &self,
        office: &BackOffice,
        catalog: &PromoCatalog,
        today: NaiveDate,
    ) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "{}", self.heading("=== Promo codes ==="))?;
        for usage in &office.promos {
            let live = catalog
                .codes()
                .iter()
                .find(|promo| promo.code == usage.code)
                .map_or("unlisted", |promo| if promo.is_valid_on(today) { "live" } else { "expired" });
            writeln!(
                out,
                "  {:<10} {:>3}%  {:<18} {:>3} use(s)  {}",
                usage.code, usage.discount_percentage, usage.affiliate, usage.uses, live
            )?;
        }
        Ok(out)
    }

    pub fn render_users(&self, office: &BackOffice) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "{}", self.heading("=== Guests ==="))?;
        for user in &office.users {
            writeln!(
                out,
                "  {}  {:<18} {:<26} {:>2} booking(s)  {:>16}  last {}",
                user.id,
                user.name,
                user.email,
                user.booking_ids.len(),
                format_idr(user.total_spent),
                user.last_booking
            )?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GuestInfo, PricingResult, PromoCatalog, SelectedDates};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn draft_view_shows_stay_and_total() {
        let selected = SelectedDates::from_days([d(2025, 3, 1), d(2025, 3, 2), d(2025, 3, 3)]);
        let promo = PromoCatalog::standard().apply("TRAVEL10").unwrap();
        let draft = BookingDraft {
            date_range: selected.date_range(),
            selected_dates: selected,
            pricing: PricingResult::calculate(2, 2_000_000, Some(&promo)).unwrap(),
            applied_promo: Some(promo),
            promo_code: "TRAVEL10".to_string(),
            ..BookingDraft::default()
        };

        let text = TextRenderer::plain().render_draft(&draft, 2_000_000).unwrap();
        assert!(text.contains("Check-in:  1 March 2025"));
        assert!(text.contains("Duration:  2 nights"));
        assert!(text.contains("Discount: -IDR 400.000"));
        assert!(text.contains("Total:     IDR 3.600.000"));
        assert!(text.contains("Promo:     TRAVEL10 (10% off)"));
    }

    #[test]
    fn draft_view_flags_invalid_promo() {
        let draft = BookingDraft {
            promo_code: "BOGUS".to_string(),
            ..BookingDraft::default()
        };
        let text = TextRenderer::plain().render_draft(&draft, 2_000_000).unwrap();
        assert!(text.contains("No dates selected"));
        assert!(text.contains("BOGUS is not valid"));
    }

    #[test]
    fn review_lists_guest_and_bank() {
        let mut guest = GuestInfo::new("Ayu Lestari", "+62811000111");
        guest.extra_bed = 1;
        let summary = ReviewSummary {
            check_in: d(2025, 3, 1),
            check_out: d(2025, 3, 5),
            nights: 4,
            guest,
            promo: None,
            pricing: PricingResult::calculate(4, 2_000_000, None).unwrap(),
        };

        let text = TextRenderer::plain().render_review(&summary, &BankAccount::default()).unwrap();
        assert!(text.contains("Name:      Ayu Lestari"));
        assert!(text.contains("Extra bed: 1 bed"));
        assert!(text.contains("Total:     IDR 8.000.000"));
        assert!(!text.contains("Discount"));
        assert!(text.contains("Bank Mandiri 1234567890 a.n. Villa Sekipan"));
    }

    #[test]
    fn availability_grid_marks_bookings() {
        let office = BackOffice::sample();
        let text = TextRenderer::plain().render_availability_month(&office, 2025, 1).unwrap();
        assert!(text.starts_with("January 2025"));
        assert!(text.contains("10B"));
        assert!(text.contains("28X"));
        assert!(text.contains(" 9 "));
    }

    #[test]
    fn rate_grid_shows_specials() {
        let office = BackOffice::sample();
        let text = TextRenderer::plain().render_rate_month(&office, 2025, 1).unwrap();
        // New Year is a holiday at 10M, Jan 4 a Saturday at 6.5M
        assert!(text.contains(" 1h 10000"));
        assert!(text.contains(" 4w  6500"));
        assert!(text.contains("Chinese New Year"));
    }

    #[test]
    fn owner_tables_render() {
        let office = BackOffice::sample();
        let renderer = TextRenderer::plain();

        let bookings = renderer.render_bookings(&office).unwrap();
        assert!(bookings.contains("Pending (1)"));
        assert!(bookings.contains("BK001"));
        assert!(bookings.contains("[proof]"));

        let promos = renderer
            .render_promos(&office, &PromoCatalog::standard(), d(2025, 6, 1))
            .unwrap();
        assert!(promos.contains("TRAVEL10"));
        assert!(promos.contains("live"));

        assert!(renderer.render_users(&office).unwrap().contains("U009"));
        assert!(renderer
            .render_dashboard(&office.dashboard(d(2025, 2, 10)))
            .unwrap()
            .contains("Pending approval:  1"));
    }
}
