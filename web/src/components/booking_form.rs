use booking_core::{
    build_payment_request, normalize_coupon_code, quote, BookHallResponse, BookingData,
    BookingForm, CouponOutcome, CouponResolver, CustomerContact, DateSelection, FieldError,
    FormField, Hall, HallPaymentRequest, Severity, UnavailableDateIndex,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::components::{date_range_picker::DateRangePicker, price_summary::PriceSummary};
use crate::server::{check_coupon, get_unavailable_dates, submit_booking};
use crate::state::use_app_state;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CouponFeedback {
    Applied(f64),
    Rejected,
}

#[component]
pub fn HallBookingForm(hall: Hall) -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();
    let hall_id = hall.id;
    let hall = StoredValue::new(hall);

    // Form state
    let customer_fullname = RwSignal::new(String::new());
    let customer_email = RwSignal::new(String::new());
    let customer_phone = RwSignal::new(String::new());
    let selection = RwSignal::new(DateSelection::default());
    let coupon_code = RwSignal::new(String::new());
    let discount_percentage = RwSignal::new(0.0_f64);

    // UI state
    let unavailable = RwSignal::new(UnavailableDateIndex::default());
    let is_loading_dates = RwSignal::new(true);
    let coupon_resolver = RwSignal::new(CouponResolver::new());
    let coupon_feedback = RwSignal::new(None::<CouponFeedback>);
    let field_errors = RwSignal::new(Vec::<FieldError>::new());
    let submission_error = RwSignal::new(None::<String>);
    let is_submitting = RwSignal::new(false);

    Effect::new(move |_| {
        spawn_local(async move {
            match get_unavailable_dates(hall_id).await {
                Ok(response) => unavailable.set(UnavailableDateIndex::from(&response)),
                Err(e) => {
                    leptos::logging::error!("Failed to fetch unavailable dates: {}", e);
                    unavailable.set(UnavailableDateIndex::default());
                }
            }
            is_loading_dates.set(false);
        });
    });

    let current_quote = Memo::new(move |_| {
        let current = selection.get();
        let percentage = discount_percentage.get();
        unavailable.with(|index| hall.with_value(|hall| quote(&current, hall, index, percentage)))
    });

    let coupon_pending = Memo::new(move |_| coupon_resolver.with(CouponResolver::is_pending));

    let apply_coupon = move || {
        let Some(code) = normalize_coupon_code(&coupon_code.get_untracked()) else {
            discount_percentage.set(0.0);
            coupon_feedback.set(None);
            return;
        };
        let Some(ticket) = coupon_resolver.try_update(|resolver| resolver.issue()) else {
            return;
        };

        spawn_local(async move {
            let result = check_coupon(code).await;
            if let Err(e) = &result {
                leptos::logging::error!("Coupon check failed: {}", e);
            }
            let outcome = coupon_resolver
                .try_update(|resolver| resolver.resolve(ticket, result))
                .unwrap_or(CouponOutcome::Stale);

            match outcome {
                CouponOutcome::Applied(percentage) => {
                    discount_percentage.set(percentage);
                    coupon_feedback.set(Some(CouponFeedback::Applied(percentage)));
                }
                CouponOutcome::Cleared => {
                    discount_percentage.set(0.0);
                    coupon_feedback.set(Some(CouponFeedback::Rejected));
                }
                CouponOutcome::Stale => {}
            }
        });
    };

    let submit = Action::new(move |request: &HallPaymentRequest| {
        let request = request.clone();
        async move {
            let result = submit_booking(request.clone()).await;
            (request, result)
        }
    });

    let reset_form = move || {
        customer_fullname.set(String::new());
        customer_email.set(String::new());
        customer_phone.set(String::new());
        selection.set(DateSelection::default());
        coupon_code.set(String::new());
        discount_percentage.set(0.0);
        coupon_feedback.set(None);
        field_errors.set(Vec::new());
    };

    let handle_submit = move || {
        if is_submitting.get_untracked() {
            return;
        }

        let form = BookingForm {
            customer_fullname: customer_fullname.get_untracked(),
            customer_email: customer_email.get_untracked(),
            customer_phone: customer_phone.get_untracked(),
            selection: selection.get_untracked(),
        };
        let coupon = normalize_coupon_code(&coupon_code.get_untracked());
        let built = hall.with_value(|hall| {
            build_payment_request(&form, hall, &current_quote.get_untracked(), coupon.as_deref())
        });

        match built {
            Ok(request) => {
                field_errors.set(Vec::new());
                submission_error.set(None);
                is_submitting.set(true);
                submit.dispatch(request);
            }
            Err(error) => field_errors.set(error.field_errors().to_vec()),
        }
    };

    let complete_booking = {
        let navigate = navigate.clone();
        move |request: &HallPaymentRequest, response: &BookHallResponse| {
            let booking = hall.with_value(|hall| BookingData::from_submission(hall, request, response));
            let contact = CustomerContact {
                email: request.customer_email.clone(),
                fullname: request.customer_fullname.clone(),
            };
            if let Err(e) = state.begin_booking(booking, contact) {
                leptos::logging::error!("Failed to store booking: {}", e);
            }
            reset_form();
            navigate("/transfer", Default::default());
        }
    };

    // Handle submission result
    Effect::new(move |_| {
        let Some((request, result)) = submit.value().get() else {
            return;
        };
        is_submitting.set(false);

        match result {
            Ok(response) => complete_booking(&request, &response),
            Err(e) => {
                submission_error.set(Some(format!("Failed to submit booking: {}", e)));
            }
        }
    });

    let error_for = move |field: FormField| {
        move || {
            field_errors.with(|errors| {
                errors
                    .iter()
                    .find(|error| error.field == field)
                    .map(|error| view! { <p class="field-error">{error.message}</p> })
            })
        }
    };

    let is_button_disabled = Memo::new(move |_| {
        is_submitting.get() || !current_quote.with(|current| current.is_bookable())
    });

    view! {
        <form class="hall-booking-form" on:submit=move |ev| {
            ev.prevent_default();
            handle_submit();
        }>
            <div class="form-section">
                <h3>"Select Dates"</h3>
                <DateRangePicker selection=selection unavailable=unavailable is_loading=is_loading_dates />

                {move || current_quote.get().error.map(|error| {
                    let intent = match error.severity() {
                        Severity::Error => MessageBarIntent::Error,
                        Severity::Warning => MessageBarIntent::Warning,
                    };
                    view! { <MessageBar intent=intent>{error.to_string()}</MessageBar> }
                })}
                {error_for(FormField::DateRange)}
            </div>

            <div class="form-section">
                <h3>"Your Details"</h3>
                <div class="form-group">
                    <label for="customer-fullname">"Full Name *"</label>
                    <Input id="customer-fullname" placeholder="Your full name" value=customer_fullname />
                    {error_for(FormField::CustomerFullname)}
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="customer-email">"Email Address *"</label>
                        <Input
                            id="customer-email"
                            input_type=InputType::Email
                            placeholder="your@email.com"
                            value=customer_email
                        />
                        {error_for(FormField::CustomerEmail)}
                    </div>
                    <div class="form-group">
                        <label for="customer-phone">"Phone Number *"</label>
                        <Input
                            id="customer-phone"
                            input_type=InputType::Tel
                            placeholder="08012345678"
                            value=customer_phone
                        />
                        {error_for(FormField::CustomerPhone)}
                    </div>
                </div>
            </div>

            <div class="form-section">
                <h3>"Coupon"</h3>
                <div class="coupon-row">
                    <Input id="coupon-code" placeholder="Enter coupon code" value=coupon_code />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        button_type=ButtonType::Button
                        on_click=move |_| apply_coupon()
                        disabled=Signal::from(coupon_pending)
                    >
                        {move || if coupon_pending.get() { "Checking..." } else { "Apply" }}
                    </Button>
                </div>
                {move || coupon_feedback.get().map(|feedback| match feedback {
                    CouponFeedback::Applied(percentage) => view! {
                        <p class="coupon-applied">{format!("Coupon applied: {}% off", percentage)}</p>
                    }
                    .into_any(),
                    CouponFeedback::Rejected => view! {
                        <p class="coupon-rejected">"Invalid or expired coupon code"</p>
                    }
                    .into_any(),
                })}
            </div>

            {move || current_quote.get().breakdown.map(|breakdown| view! {
                <div class="form-section">
                    <h3>"Booking Summary"</h3>
                    <PriceSummary breakdown=breakdown discount_percentage=discount_percentage.get() />
                </div>
            })}

            {move || submission_error.get().map(|error| view! {
                <MessageBar intent=MessageBarIntent::Error>{error}</MessageBar>
            })}

            <div class="form-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    button_type=ButtonType::Submit
                    disabled=Signal::from(is_button_disabled)
                    loading=is_submitting
                >
                    {move || if is_submitting.get() { "Submitting..." } else { "Book Now" }}
                </Button>
            </div>
        </form>
    }
}
