use booking_core::require;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::components::booking_summary::{BookingSummary, SummaryFigures};
use crate::state::use_app_state;

#[component]
pub fn ConfirmPaymentPage() -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();

    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            if !state.restored.get() {
                return;
            }
            if let Err(redirect) = require(state.confirm.get()) {
                navigate(redirect.path(), Default::default());
            }
        }
    });

    let back_to_hall = move || {
        state.reset();
        navigate("/hall", Default::default());
    };

    view! {
        <div class="confirm-payment-page">
            {move || match state.confirm.get() {
                None => view! {
                    <p class="redirect-note">"No confirmation found. Redirecting..."</p>
                }
                .into_any(),
                Some(confirm) => {
                    let display = confirm.status_display();
                    let status_label = confirm.status_label().to_string();

                    view! {
                        <div class=format!("confirm-header {}", display.tone.class_name())>
                            <h1 class="confirm-title">{display.title}</h1>
                            <p class="confirm-message">{display.message}</p>
                            <span class="status-badge">{status_label}</span>
                        </div>

                        {confirm.message.clone().filter(|m| !m.trim().is_empty()).map(|message| view! {
                            <p class="confirm-server-message">{message}</p>
                        })}

                        {confirm.transaction_reference.clone().map(|reference| view! {
                            <div class="confirm-reference">
                                <span class="label">"Transaction Reference"</span>
                                <span class="value">{reference}</span>
                            </div>
                        })}

                        <BookingSummary figures=SummaryFigures::from(&confirm) />
                    }
                    .into_any()
                }
            }}

            <div class="confirm-actions">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| back_to_hall()>
                    "Back to Hall Listings"
                </Button>
            </div>
        </div>
    }
}
