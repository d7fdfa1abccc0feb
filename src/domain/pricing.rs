use crate::domain::PromoCode;
use serde::{Deserialize, Serialize};

/// Amount in whole Indonesian rupiah. IDR has no minor unit in practice.
pub type Rupiah = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub original_price: Rupiah,
    pub discount_amount: Rupiah,
    pub final_price: Rupiah,
}

impl PricingResult {
    /// Prices a stay of `nights` at a flat nightly rate.
    ///
    /// Returns `None` when there is nothing to price (`nights <= 0`); the
    /// caller keeps whatever result it already shows.
    pub fn calculate(nights: i64, base_price: Rupiah, promo: Option<&PromoCode>) -> Option<Self> {
        if nights <= 0 {
            return None;
        }

        let original_price = base_price.saturating_mul(nights as u64);
        let discount_amount = promo
            .map(|promo| percent_of(original_price, promo.discount_percentage))
            .unwrap_or(0);

        Some(Self {
            original_price,
            discount_amount,
            final_price: original_price.saturating_sub(discount_amount),
        })
    }

    pub fn has_discount(&self) -> bool {
        self.discount_amount > 0
    }
}

/// `amount * percentage / 100`, rounded down to the rupiah.
pub fn percent_of(amount: Rupiah, percentage: u32) -> Rupiah {
    let scaled = amount as u128 * percentage as u128 / 100;
    scaled.min(Rupiah::MAX as u128) as Rupiah
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PromoCatalog;

    #[test]
    fn four_nights_at_base_rate() {
        let pricing = PricingResult::calculate(4, 2_000_000, None).unwrap();
        assert_eq!(pricing.original_price, 8_000_000);
        assert_eq!(pricing.discount_amount, 0);
        assert_eq!(pricing.final_price, 8_000_000);
        assert!(!pricing.has_discount());
    }

    #[test]
    fn travel10_takes_ten_percent() {
        let promo = PromoCatalog::standard().apply("TRAVEL10").unwrap();
        let pricing = PricingResult::calculate(4, 2_000_000, Some(&promo)).unwrap();
        assert_eq!(pricing.original_price, 8_000_000);
        assert_eq!(pricing.discount_amount, 800_000);
        assert_eq!(pricing.final_price, 7_200_000);
    }

    #[test]
    fn no_nights_means_no_update() {
        assert_eq!(PricingResult::calculate(0, 2_000_000, None), None);
        assert_eq!(PricingResult::calculate(-3, 2_000_000, None), None);
    }

    #[test]
    fn calculation_is_idempotent() {
        let promo = PromoCatalog::standard().apply("SUMMER25").unwrap();
        let first = PricingResult::calculate(3, 1_500_000, Some(&promo));
        let second = PricingResult::calculate(3, 1_500_000, Some(&promo));
        assert_eq!(first, second);
        assert_eq!(first.unwrap().final_price, 3_375_000);
    }

    #[test]
    fn discount_rounds_down() {
        assert_eq!(percent_of(999, 10), 99);
        assert_eq!(percent_of(1_000, 0), 0);
        assert_eq!(percent_of(u64::MAX, 100), u64::MAX);
    }
}
