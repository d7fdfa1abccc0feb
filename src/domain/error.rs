use thiserror::Error;

/// Recoverable, user-facing failures of the booking flow. The `Display`
/// text is what the guest gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Invalid promo code")]
    PromoNotFound { code: String },

    #[error("Please select at least 2 dates (check-in and check-out)")]
    IncompleteSelection { selected: usize },

    #[error("Please fill in all required fields: {}", .missing.join(", "))]
    MissingGuestFields { missing: Vec<&'static str> },

    #[error("Please fill in all required fields: {}", .missing.join(", "))]
    MissingPaymentDetails { missing: Vec<&'static str> },

    #[error("No stay selected yet, pick your dates on the calendar first")]
    NoStaySelected,

    #[error("Guest details have not been submitted yet")]
    GuestInfoMissing,

    #[error("An error occurred. Please try again.")]
    Submission { reason: String },
}
