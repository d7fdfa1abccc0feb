use crate::domain::{Locale, long_date, long_timestamp};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use url::Url;

/// `https://wa.me/<number>?text=<message>`. Anything that is not a digit is
/// dropped from the number.
pub fn chat_link(number: &str, message: &str) -> Result<Url> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    Url::parse_with_params(&format!("https://wa.me/{digits}"), &[("text", message)])
        .with_context(|| format!("invalid WhatsApp number: {number}"))
}

/// Availability question sent from the calendar step.
pub fn booking_request_message(check_in: NaiveDate, check_out: NaiveDate, nights: i64) -> String {
    format!(
        "Permisi, saya ingin booking villa dari tanggal {} hingga {}, {} malam. \
         Mohon informasi ketersediaan dan proses booking. Terima kasih.",
        long_date(check_in, Locale::English),
        long_date(check_out, Locale::English),
        nights
    )
}

/// Order confirmation sent from the confirmation page.
pub fn confirmation_message(
    check_in: NaiveDate,
    check_out: NaiveDate,
    ordered_at: NaiveDateTime,
    reference: &str,
    order_link: &str,
) -> String {
    format!(
        "Saya mau konfirmasi pemesanan tanggal {} sampai {} pada jam {}. \
         Kode booking: {}. Link order: {}. Terima kasih.",
        long_date(check_in, Locale::Indonesian),
        long_date(check_out, Locale::Indonesian),
        long_timestamp(ordered_at, Locale::Indonesian),
        reference,
        order_link
    )
}
