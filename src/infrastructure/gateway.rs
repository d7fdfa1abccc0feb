//! Booking submission.
//!
//! Nothing is settled here; the simulated gateway only waits and hands back
//! a booking reference, standing in for whatever back end takes the order.

use crate::domain::{GuestInfo, PaymentDetails, PricingResult};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveDateTime};
use log::info;
use serde::Serialize;
use std::time::Duration;

/// Snapshot of a finished draft, ready to be sent off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub guest: GuestInfo,
    pub promo_code: Option<String>,
    pub pricing: PricingResult,
    pub payment: PaymentDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReceipt {
    pub reference: String,
    pub created_at: NaiveDateTime,
}

#[async_trait]
pub trait BookingGateway: Send + Sync {
    fn name(&self) -> &str;

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingReceipt>;
}

pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl BookingGateway for SimulatedGateway {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingReceipt> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let now = Local::now();
        let reference = booking_reference(now.timestamp_millis());
        info!(
            "simulated booking {} for {}..{} ({} nights)",
            reference, request.check_in, request.check_out, request.nights
        );

        Ok(BookingReceipt {
            reference,
            created_at: now.naive_local(),
        })
    }
}

/// `VS-` followed by the last eight digits of the millisecond timestamp.
pub fn booking_reference(epoch_millis: i64) -> String {
    format!("VS-{:08}", epoch_millis.rem_euclid(100_000_000))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            check_in: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            nights: 4,
            guest: GuestInfo::new("Ayu Lestari", "+62811000111"),
            promo_code: None,
            pricing: PricingResult::calculate(4, 2_000_000, None).unwrap(),
            payment: PaymentDetails::new(
                "receipt.jpg",
                NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
            ),
        }
    }

    #[test]
    fn reference_keeps_last_eight_digits() {
        assert_eq!(booking_reference(1_735_689_600_123), "VS-89600123");
        assert_eq!(booking_reference(42), "VS-00000042");
    }

    #[tokio::test]
    async fn simulated_gateway_returns_reference() {
        let receipt = SimulatedGateway::instant()
            .create_booking(&request())
            .await
            .unwrap();

        assert!(receipt.reference.starts_with("VS-"));
        assert_eq!(receipt.reference.len(), 11);
    }

    #[tokio::test]
    async fn simulated_gateway_waits_for_delay() {
        let gateway = SimulatedGateway::new(Duration::from_millis(20));
        let started = std::time::Instant::now();
        gateway.create_booking(&request()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
