pub mod booking_form;
pub mod booking_summary;
pub mod date_range_picker;
pub mod error;
pub mod loading;
pub mod price_summary;

// Re-export commonly used types
pub use booking_form::HallBookingForm;
pub use booking_summary::{BookingSummary, SummaryFigures};
pub use date_range_picker::DateRangePicker;
pub use price_summary::PriceSummary;
