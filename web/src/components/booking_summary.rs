use booking_core::{display_date, format_naira, BookingData, ConfirmData, NaiveDate};
use leptos::prelude::*;

/// Figures shared by the transfer and confirmation pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFigures {
    pub hall_name: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub days: u32,
    pub base_amount: i64,
    pub discount: i64,
    pub charges: i64,
    pub total: i64,
}

impl From<&BookingData> for SummaryFigures {
    fn from(booking: &BookingData) -> Self {
        Self {
            hall_name: booking.hall_name.clone(),
            from_date: booking.from_date,
            to_date: booking.to_date,
            days: booking.days,
            base_amount: booking.base_amount,
            discount: booking.discount,
            charges: booking.charges,
            total: booking.total,
        }
    }
}

impl From<&ConfirmData> for SummaryFigures {
    fn from(confirm: &ConfirmData) -> Self {
        Self {
            hall_name: confirm.hall_name.clone(),
            from_date: confirm.from_date,
            to_date: confirm.to_date,
            days: confirm.days,
            base_amount: confirm.base_amount,
            discount: confirm.discount,
            charges: confirm.charges,
            total: confirm.total,
        }
    }
}

#[component]
pub fn BookingSummary(figures: SummaryFigures) -> impl IntoView {
    let day_label = if figures.days == 1 { "day" } else { "days" };

    view! {
        <div class="booking-summary">
            <h3>{figures.hall_name}</h3>
            <div class="summary-row">
                <span>"Dates"</span>
                <span>{format!("{} - {}", display_date(figures.from_date), display_date(figures.to_date))}</span>
            </div>
            <div class="summary-row">
                <span>"Duration"</span>
                <span>{format!("{} {}", figures.days, day_label)}</span>
            </div>
            <div class="summary-row">
                <span>"Base amount"</span>
                <span>{format_naira(figures.base_amount)}</span>
            </div>
            {(figures.discount > 0).then(|| view! {
                <div class="summary-row discount">
                    <span>"Discount"</span>
                    <span>{format!("-{}", format_naira(figures.discount))}</span>
                </div>
            })}
            <div class="summary-row">
                <span>"Booking charges"</span>
                <span>{format_naira(figures.charges)}</span>
            </div>
            <div class="summary-row total">
                <span>"Total"</span>
                <span>{format_naira(figures.total)}</span>
            </div>
        </div>
    }
}
