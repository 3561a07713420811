use booking_core::{format_naira, Hall};
use leptos::prelude::*;

use crate::components::{booking_form::HallBookingForm, error::ErrorView, loading::LoadingView};
use crate::server::get_hall;

#[component]
pub fn HallPage() -> impl IntoView {
    let hall_resource = Resource::new(|| (), |_| async move { get_hall().await });

    view! {
        <div class="hall-page">
            <Suspense fallback=move || view! { <LoadingView message="Loading hall details..." /> }>
                {move || {
                    hall_resource.get().map(|result| match result {
                        Ok(hall) => view! {
                            <HallDetails hall=hall.clone() />
                            <HallBookingForm hall=hall />
                        }
                        .into_any(),
                        Err(e) => {
                            leptos::logging::error!("Failed to load hall: {}", e);
                            view! {
                                <ErrorView
                                    message="Error loading hall data. Please try refreshing the page."
                                    on_retry=Callback::new(move |_| hall_resource.refetch())
                                />
                            }
                            .into_any()
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn HallDetails(hall: Hall) -> impl IntoView {
    let has_image = !hall.image.trim().is_empty();

    view! {
        <section class="hall-details">
            {has_image.then(|| view! {
                <img class="hall-image" src=hall.image.clone() alt=hall.name.clone() />
            })}
            <div class="hall-info">
                <h1>{hall.name.clone()}</h1>
                <p class="hall-description">{hall.description.clone()}</p>
                <div class="hall-pricing">
                    <div class="hall-price">
                        <span class="label">"Price per day"</span>
                        <span class="value">{format_naira(hall.price_per_day)}</span>
                    </div>
                    <div class="hall-price">
                        <span class="label">"Booking charges"</span>
                        <span class="value">{format_naira(hall.charges_fee)}</span>
                    </div>
                </div>
            </div>
        </section>
    }
}
