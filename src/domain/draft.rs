use crate::domain::{DateRange, GuestInfo, PricingResult, PromoCode, SelectedDates};
use serde::{Deserialize, Serialize};

/// Everything the guest has entered so far in one booking attempt.
///
/// Serialized as a whole on every change; dates travel as `YYYY-MM-DD`
/// strings and come back as calendar days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDraft {
    pub date_range: DateRange,
    pub selected_dates: SelectedDates,
    pub guest_info: Option<GuestInfo>,
    pub form_data: GuestInfo,
    pub promo_code: String,
    pub applied_promo: Option<PromoCode>,
    pub pricing: PricingResult,
}

impl BookingDraft {
    pub fn nights(&self) -> i64 {
        self.date_range.nights()
    }

    pub fn has_stay(&self) -> bool {
        self.date_range.is_complete()
    }

    /// Submitted guest details, or the form as typed when nothing was
    /// submitted yet.
    pub fn guest(&self) -> &GuestInfo {
        self.guest_info.as_ref().unwrap_or(&self.form_data)
    }

    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}
