use crate::domain::BookingError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub code: String,
    pub discount_percentage: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_id: Option<String>,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub is_active: bool,
}

impl PromoCode {
    pub fn new(
        code: impl Into<String>,
        discount_percentage: u32,
        valid_from: NaiveDate,
        valid_until: NaiveDate,
    ) -> Self {
        Self {
            code: code.into().to_uppercase(),
            discount_percentage,
            affiliate_id: None,
            valid_from,
            valid_until,
            is_active: true,
        }
    }

    pub fn with_affiliate(mut self, affiliate_id: impl Into<String>) -> Self {
        self.affiliate_id = Some(affiliate_id.into());
        self
    }

    pub fn deactivate(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Active and inside its validity window on `date`.
    ///
    /// Catalog lookups ignore this. The back-office promo table
    /// uses it to show which codes are live.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.is_active && date >= self.valid_from && date <= self.valid_until
    }
}

/// Fixed in-memory list of discount codes offered by the booking flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCatalog {
    codes: Vec<PromoCode>,
}

impl PromoCatalog {
    pub fn new(codes: Vec<PromoCode>) -> Self {
        Self { codes }
    }

    /// The two affiliate codes the villa currently hands out.
    pub fn standard() -> Self {
        let valid_from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN);
        let valid_until = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap_or(NaiveDate::MAX);

        Self::new(vec![
            PromoCode::new("TRAVEL10", 10, valid_from, valid_until).with_affiliate("aff1"),
            PromoCode::new("SUMMER25", 25, valid_from, valid_until).with_affiliate("aff2"),
        ])
    }

    pub fn codes(&self) -> &[PromoCode] {
        &self.codes
    }

    /// Looks `code` up case-insensitively. Surrounding whitespace is ignored.
    pub fn apply(&self, code: &str) -> Result<PromoCode, BookingError> {
        let normalized = code.trim().to_uppercase();
        self.codes
            .iter()
            .find(|promo| promo.code == normalized)
            .cloned()
            .ok_or(BookingError::PromoNotFound { code: normalized })
    }
}

impl Default for PromoCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = PromoCatalog::standard();
        let promo = catalog.apply("travel10").unwrap();
        assert_eq!(promo.code, "TRAVEL10");
        assert_eq!(promo.discount_percentage, 10);
        assert_eq!(promo.affiliate_id.as_deref(), Some("aff1"));

        assert_eq!(catalog.apply("  Summer25 ").unwrap().discount_percentage, 25);
    }

    #[test]
    fn unknown_code_is_not_found() {
        let err = PromoCatalog::standard().apply("BOGUS").unwrap_err();
        assert_eq!(
            err,
            BookingError::PromoNotFound {
                code: "BOGUS".to_string()
            }
        );
        assert_eq!(err.to_string(), "Invalid promo code");
    }

    #[test]
    fn lookup_ignores_validity_window() {
        let old = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let expired = PromoCode::new("OLD5", 5, old, old).deactivate();
        let catalog = PromoCatalog::new(vec![expired.clone()]);

        assert_eq!(catalog.apply("old5").unwrap(), expired);
        assert!(!expired.is_valid_on(old));
    }

    #[test]
    fn validity_window_is_inclusive() {
        let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let until = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let promo = PromoCode::new("JAN", 15, from, until);

        assert!(promo.is_valid_on(from));
        assert!(promo.is_valid_on(until));
        assert!(!promo.is_valid_on(until.succ_opt().unwrap()));
    }
}
