pub mod availability;
pub mod coupon;
pub mod currency;
pub mod hall;
pub mod payment;
pub mod pricing;
pub mod store;
pub mod submission;
pub mod transfer;
pub mod validation;

pub use chrono::NaiveDate;

pub use availability::{
    day_token, UnavailableDateIndex, UnavailableDateRange, UnavailableDatesResponse,
};
pub use coupon::{
    normalize_coupon_code, CouponCheckRequest, CouponCheckResponse, CouponOutcome, CouponResolver,
    CouponTicket,
};
pub use currency::format_naira;
pub use hall::{Hall, HallEnvelope, HallRecord};
pub use payment::{
    ConfirmData, ConfirmStatusRequest, ConfirmStatusResponse, PaymentStatus, StatusDisplay,
    StatusTone,
};
pub use pricing::{calculate_price, clamp_discount, quote, PriceBreakdown, PriceCalculation, Quote};
pub use store::{
    require, CustomerContact, KeyValueStore, MemoryStore, Redirect, SessionStore, StoreError,
    WriteRejected,
};
pub use submission::{
    build_payment_request, BookHallResponse, BookingData, BookingForm, FieldError, FormField,
    HallPaymentRequest, SubmissionError, TransferDetails,
};
pub use transfer::{TransferError, TransferFlow, TransferPhase, TRANSFER_COUNTDOWN_SECS};
pub use validation::{is_day_disabled, validate_range, DateRangeError, DateSelection, Severity};

/// Calendar dates travel as `YYYY-MM-DD` everywhere: API payloads, stores and day tokens.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Short display form used on the summary pages, e.g. `Jan 10, 2025`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}
