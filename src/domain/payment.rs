use crate::domain::BookingError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What the guest hands over on the payment step: a transfer receipt and
/// the day the transfer was made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub proof_path: Option<PathBuf>,
    pub transfer_date: Option<NaiveDate>,
}

impl PaymentDetails {
    pub fn new(proof_path: impl Into<PathBuf>, transfer_date: NaiveDate) -> Self {
        Self {
            proof_path: Some(proof_path.into()),
            transfer_date: Some(transfer_date),
        }
    }

    pub fn validate(&self) -> Result<(), BookingError> {
        let mut missing = Vec::new();
        if self.proof_path.is_none() {
            missing.push("payment proof");
        }
        if self.transfer_date.is_none() {
            missing.push("transfer date");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(BookingError::MissingPaymentDetails { missing })
        }
    }
}

/// Account the guest transfers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccount {
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
}

impl Default for BankAccount {
    fn default() -> Self {
        Self {
            bank_name: "Bank Mandiri".to_string(),
            account_number: "1234567890".to_string(),
            account_name: "Villa Sekipan".to_string(),
        }
    }
}
