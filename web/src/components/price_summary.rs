use booking_core::{format_naira, PriceBreakdown};
use leptos::prelude::*;

#[component]
pub fn PriceSummary(breakdown: PriceBreakdown, discount_percentage: f64) -> impl IntoView {
    let day_label = if breakdown.days == 1 { "day" } else { "days" };

    view! {
        <div class="price-summary">
            <div class="price-row">
                <span>{format!("{} x {} {}", format_naira(breakdown.price_per_day), breakdown.days, day_label)}</span>
                <span>{format_naira(breakdown.base_price)}</span>
            </div>
            {(breakdown.discount_amount > 0).then(|| view! {
                <div class="price-row discount">
                    <span>{format!("Coupon discount ({}%)", discount_percentage)}</span>
                    <span>{format!("-{}", format_naira(breakdown.discount_amount))}</span>
                </div>
            })}
            <div class="price-row">
                <span>"Booking charges"</span>
                <span>{format_naira(breakdown.charges)}</span>
            </div>
            <div class="price-row total">
                <span>"Total"</span>
                <span>{format_naira(breakdown.total_price)}</span>
            </div>
        </div>
    }
}
