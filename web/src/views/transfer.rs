use std::time::Duration;

use booking_core::{
    format_naira, require, ConfirmData, ConfirmStatusRequest, PaymentStatus, TransferFlow,
    TransferPhase,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::components::booking_summary::{BookingSummary, SummaryFigures};
use crate::server::confirm_payment;
use crate::state::{copy_to_clipboard, use_app_state};

#[component]
pub fn TransferPage() -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();

    let flow = RwSignal::new(TransferFlow::new());
    let copied_field = RwSignal::new(None::<&'static str>);
    let check_error = RwSignal::new(None::<String>);

    // Nothing to pay for: back to the hall.
    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            if !state.restored.get() || flow.with(TransferFlow::is_finished) {
                return;
            }
            if let Err(redirect) = require(state.booking.get()) {
                navigate(redirect.path(), Default::default());
            }
        }
    });

    // One tick per second until the transfer window closes.
    Effect::new(move |_| {
        if matches!(flow.with(|f| f.phase().clone()), TransferPhase::AwaitingTransfer { .. }) {
            set_timeout(
                move || {
                    let _ = flow.try_update(TransferFlow::tick);
                },
                Duration::from_secs(1),
            );
        }
    });

    let confirm_paid = {
        let navigate = navigate.clone();
        move || {
            let Some(booking) = state.booking.get_untracked() else {
                return;
            };
            let started = flow.try_update(TransferFlow::begin_check);
            if !matches!(started, Some(Ok(()))) {
                return;
            }
            check_error.set(None);

            let request = ConfirmStatusRequest::for_booking(
                &booking,
                &state.customer(),
                chrono::Utc::now().timestamp_millis(),
            );
            let navigate = navigate.clone();

            spawn_local(async move {
                match confirm_payment(request.clone()).await {
                    Ok(response) => {
                        let confirm = ConfirmData::from_confirmation(&booking, &request, &response);
                        let status = confirm
                            .status
                            .clone()
                            .unwrap_or_else(|| PaymentStatus::Unknown(String::new()));
                        // A failed write leaves the booking in place so the check can be retried.
                        if let Err(e) = state.finish_confirmation(confirm) {
                            leptos::logging::error!("Failed to store confirmation: {}", e);
                            let _ = flow.try_update(TransferFlow::check_failed);
                            check_error.set(Some(
                                "We couldn't save your payment confirmation. Please try again."
                                    .to_string(),
                            ));
                            return;
                        }
                        let _ = flow.try_update(|f| f.check_succeeded(status));
                        navigate("/confirm-payment", Default::default());
                    }
                    Err(e) => {
                        leptos::logging::error!("Payment confirmation failed: {}", e);
                        let _ = flow.try_update(TransferFlow::check_failed);
                        check_error.set(Some(
                            "We couldn't confirm your payment. Please try again.".to_string(),
                        ));
                    }
                }
            });
        }
    };

    let cancel = move || {
        let cancelled = flow.try_update(TransferFlow::cancel);
        if matches!(cancelled, Some(Ok(()))) {
            state.cancel_booking();
            navigate("/hall", Default::default());
        }
    };

    let copy = move |field: &'static str, value: String| {
        copy_to_clipboard(&value);
        copied_field.set(Some(field));
        set_timeout(
            move || {
                let _ = copied_field.try_set(None);
            },
            Duration::from_secs(2),
        );
    };

    let confirm_disabled = Memo::new(move |_| !flow.with(TransferFlow::can_confirm));
    let cancel_disabled = Memo::new(move |_| !flow.with(TransferFlow::can_cancel));
    let is_checking = Memo::new(move |_| flow.with(TransferFlow::is_checking));

    view! {
        <div class="transfer-page">
            {move || match state.booking.get() {
                None => view! {
                    <p class="redirect-note">"No booking found. Redirecting..."</p>
                }
                .into_any(),
                Some(booking) => {
                    let account_number = booking.account_number.clone();
                    let account_to_copy = booking.account_number.clone();
                    let reference = booking.transaction_reference.clone();
                    let reference_to_copy = booking.transaction_reference.clone();

                    view! {
                        <div class="transfer-content">
                            <h1>"Complete Your Payment"</h1>
                            <p class="transfer-subtitle">
                                {format!(
                                    "Transfer {} to the account below, then confirm your payment.",
                                    format_naira(booking.total),
                                )}
                            </p>

                            <BookingSummary figures=SummaryFigures::from(&booking) />

                            <div class="bank-details">
                                <h3>"Bank Transfer Details"</h3>
                                <div class="bank-row">
                                    <span class="label">"Bank"</span>
                                    <span class="value">{booking.bank_name.clone()}</span>
                                </div>
                                <div class="bank-row">
                                    <span class="label">"Account Name"</span>
                                    <span class="value">{booking.account_name.clone()}</span>
                                </div>
                                <div class="bank-row">
                                    <span class="label">"Account Number"</span>
                                    <span class="value">{account_number}</span>
                                    <Button
                                        appearance=ButtonAppearance::Subtle
                                        size=ButtonSize::Small
                                        on_click=move |_| copy("account", account_to_copy.clone())
                                    >
                                        {move || if copied_field.get() == Some("account") { "Copied" } else { "Copy" }}
                                    </Button>
                                </div>
                                <div class="bank-row">
                                    <span class="label">"Amount"</span>
                                    <span class="value">{format_naira(booking.total)}</span>
                                </div>
                                {(!reference.is_empty()).then(move || view! {
                                    <div class="bank-row">
                                        <span class="label">"Reference"</span>
                                        <span class="value">{reference}</span>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            size=ButtonSize::Small
                                            on_click=move |_| copy("reference", reference_to_copy.clone())
                                        >
                                            {move || if copied_field.get() == Some("reference") { "Copied" } else { "Copy" }}
                                        </Button>
                                    </div>
                                })}
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}

            <div class="transfer-countdown">
                <div class="progress-track">
                    <div
                        class="progress-fill"
                        style=move || format!("width: {}%", flow.with(TransferFlow::progress_percent))
                    ></div>
                </div>
                <p class="countdown-label">
                    {move || {
                        let remaining = flow.with(TransferFlow::remaining_secs);
                        if remaining > 0 {
                            format!(
                                "You can confirm your payment in {}:{:02}",
                                remaining / 60,
                                remaining % 60,
                            )
                        } else {
                            "Made the transfer? Confirm your payment below.".to_string()
                        }
                    }}
                </p>
            </div>

            {move || check_error.get().map(|error| view! {
                <MessageBar intent=MessageBarIntent::Error>{error}</MessageBar>
            })}

            <div class="transfer-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| confirm_paid()
                    disabled=Signal::from(confirm_disabled)
                    loading=Signal::from(is_checking)
                >
                    {move || if is_checking.get() { "Checking payment..." } else { "I Have Paid" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| cancel()
                    disabled=Signal::from(cancel_disabled)
                >
                    "Back to Hall"
                </Button>
            </div>
        </div>
    }
}
