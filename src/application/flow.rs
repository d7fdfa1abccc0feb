use crate::application::BookingStore;
use crate::domain::{
    Availability, BookingDraft, BookingError, GuestInfo, Locale, PaymentDetails, PricingResult,
    PromoCatalog, PromoCode, Rupiah,
};
use crate::infrastructure::{BookingGateway, BookingRequest, whatsapp};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use url::Url;

/// Pages of the guest booking wizard, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStep {
    Calendar,
    Form,
    Review,
    Payment,
    Confirmation(String),
}

impl WizardStep {
    pub fn path(&self, locale: Locale) -> String {
        let page = match self {
            WizardStep::Calendar => "/book/calendar".to_string(),
            WizardStep::Form => "/book/form".to_string(),
            WizardStep::Review => "/book/review".to_string(),
            WizardStep::Payment => "/book/payment".to_string(),
            WizardStep::Confirmation(reference) => format!("/book/confirmation/{reference}"),
        };
        format!("{}{}", locale.prefix(), page)
    }

    /// Where a guest asking for this step actually lands, given the draft.
    pub fn guard(self, draft: &BookingDraft) -> WizardStep {
        match self {
            WizardStep::Form | WizardStep::Review if !draft.has_stay() => WizardStep::Calendar,
            WizardStep::Payment if !draft.has_stay() => WizardStep::Calendar,
            WizardStep::Payment if draft.guest_info.is_none() => WizardStep::Form,
            step => step,
        }
    }
}

/// What the review page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub guest: GuestInfo,
    pub promo: Option<PromoCode>,
    pub pricing: PricingResult,
}

/// A submitted booking, kept after the draft itself is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub reference: String,
    pub created_at: NaiveDateTime,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub guest: GuestInfo,
    pub pricing: PricingResult,
}

impl Confirmation {
    pub fn step(&self) -> WizardStep {
        WizardStep::Confirmation(self.reference.clone())
    }

    pub fn whatsapp_link(&self, admin: &str, order_link: &str) -> Result<Url> {
        let message = whatsapp::confirmation_message(
            self.check_in,
            self.check_out,
            self.created_at,
            &self.reference,
            order_link,
        );
        whatsapp::chat_link(admin, &message)
    }
}

/// Rules of the guest wizard applied to a session's draft store.
pub struct BookingFlow {
    catalog: PromoCatalog,
    availability: Availability,
    base_price: Rupiah,
}

impl BookingFlow {
    pub fn new(catalog: PromoCatalog, availability: Availability, base_price: Rupiah) -> Self {
        Self {
            catalog,
            availability,
            base_price,
        }
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    pub fn catalog(&self) -> &PromoCatalog {
        &self.catalog
    }

    pub fn base_price(&self) -> Rupiah {
        self.base_price
    }

    /// Runs one calendar click through the selection reducer and reprices.
    pub fn toggle_date(
        &self,
        store: &mut BookingStore,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<()> {
        let previous = &store.draft().selected_dates;
        let next = previous.toggle(date, &self.availability, today);

        if &next == previous {
            debug!("toggle {date}: {} unchanged", self.availability.classify(date, today).label());
            return Ok(());
        }

        if let (Some(first), Some(last)) = (next.first(), next.last()) {
            let unavailable = self.availability.unavailable_between(first, last);
            if !unavailable.is_empty() {
                warn!(
                    "selection {first}..{last} spans {} unavailable day(s)",
                    unavailable.len()
                );
            }
        }

        debug!("toggle {date}: {} day(s) selected", next.len());
        let base_price = self.base_price;
        store.update(|draft| {
            draft.date_range = next.date_range();
            draft.selected_dates = next;
            refresh_pricing(draft, base_price);
        })
    }

    /// Looks the typed code up. A miss clears any promo applied before.
    pub fn apply_promo(&self, store: &mut BookingStore, code: &str) -> Result<PromoCode> {
        let lookup = self.catalog.apply(code);
        let base_price = self.base_price;
        let applied = lookup.as_ref().ok().cloned();

        store.update(|draft| {
            draft.promo_code = code.to_string();
            draft.applied_promo = applied;
            refresh_pricing(draft, base_price);
        })?;

        match lookup {
            Ok(promo) => {
                info!("applied promo {} ({}%)", promo.code, promo.discount_percentage);
                Ok(promo)
            }
            Err(e) => {
                debug!("promo lookup failed for {code:?}");
                Err(e.into())
            }
        }
    }

    pub fn remove_promo(&self, store: &mut BookingStore) -> Result<()> {
        let base_price = self.base_price;
        store.update(|draft| {
            draft.promo_code.clear();
            draft.applied_promo = None;
            refresh_pricing(draft, base_price);
        })
    }

    pub fn continue_from_calendar(&self, store: &BookingStore) -> Result<WizardStep> {
        let selected = store.draft().selected_dates.len();
        if selected < 2 {
            return Err(BookingError::IncompleteSelection { selected }.into());
        }

        info!("calendar -> form with {} night(s)", store.draft().nights());
        Ok(WizardStep::Form)
    }

    pub fn update_form<F>(&self, store: &mut BookingStore, edit: F) -> Result<()>
    where
        F: FnOnce(&mut GuestInfo),
    {
        store.update(|draft| edit(&mut draft.form_data))
    }

    /// Checks the required fields and stores the form as the guest details.
    pub fn submit_guest_form(&self, store: &mut BookingStore) -> Result<WizardStep> {
        if !store.draft().has_stay() {
            return Err(BookingError::NoStaySelected.into());
        }
        store.draft().form_data.validate()?;

        let guest = store.draft().form_data.clone();
        store.set_guest_info(Some(guest))?;
        info!("form -> review");
        Ok(WizardStep::Review)
    }

    pub fn review(&self, store: &BookingStore) -> Result<ReviewSummary> {
        let draft = store.draft();
        let (check_in, check_out) = draft
            .date_range
            .endpoints()
            .ok_or(BookingError::NoStaySelected)?;
        let guest = draft
            .guest_info
            .clone()
            .ok_or(BookingError::GuestInfoMissing)?;

        Ok(ReviewSummary {
            check_in,
            check_out,
            nights: draft.nights(),
            guest,
            promo: draft.applied_promo.clone(),
            pricing: draft.pricing,
        })
    }

    /// Sends the finished draft off. The draft is cleared only once the
    /// gateway has accepted it; on failure it stays as it was.
    pub async fn submit_payment(
        &self,
        store: &mut BookingStore,
        gateway: &dyn BookingGateway,
        payment: PaymentDetails,
    ) -> Result<Confirmation> {
        payment.validate()?;
        let summary = self.review(store)?;

        let request = BookingRequest {
            check_in: summary.check_in,
            check_out: summary.check_out,
            nights: summary.nights,
            guest: summary.guest.clone(),
            promo_code: summary.promo.as_ref().map(|p| p.code.clone()),
            pricing: summary.pricing,
            payment,
        };

        info!("submitting booking through {} gateway", gateway.name());
        let receipt = gateway.create_booking(&request).await.map_err(|e| {
            warn!("booking submission failed: {e:#}");
            BookingError::Submission {
                reason: format!("{e:#}"),
            }
        })?;

        store.reset_booking()?;
        info!("payment -> confirmation {}", receipt.reference);

        Ok(Confirmation {
            reference: receipt.reference,
            created_at: receipt.created_at,
            check_in: summary.check_in,
            check_out: summary.check_out,
            nights: summary.nights,
            guest: summary.guest,
            pricing: summary.pricing,
        })
    }

    /// WhatsApp link asking the admin about the selected stay.
    pub fn booking_request_link(&self, store: &BookingStore, admin: &str) -> Result<Url> {
        let draft = store.draft();
        let (check_in, check_out) = draft
            .date_range
            .endpoints()
            .ok_or(BookingError::NoStaySelected)?;
        let message = whatsapp::booking_request_message(check_in, check_out, draft.nights());
        whatsapp::chat_link(admin, &message)
    }

    /// Leaves the wizard from any step, discarding the draft.
    pub fn reset(&self, store: &mut BookingStore) -> Result<WizardStep> {
        store.reset_booking()?;
        info!("draft reset");
        Ok(WizardStep::Calendar)
    }
}

/// Reprices the draft. With no nights selected the last result stays.
pub fn refresh_pricing(draft: &mut BookingDraft, base_price: Rupiah) {
    if let Some(pricing) =
        PricingResult::calculate(draft.nights(), base_price, draft.applied_promo.as_ref())
    {
        draft.pricing = pricing;
    }
}
