use booking_core::{
    BookHallResponse, ConfirmStatusRequest, ConfirmStatusResponse, CouponCheckResponse, Hall,
    HallPaymentRequest, UnavailableDatesResponse,
};
use leptos::prelude::*;
use leptos::server;
use leptos::server_fn::codec::Json;

#[cfg(feature = "ssr")]
use crate::remote::{api, ApiError};

#[cfg(feature = "ssr")]
fn upstream_error(context: &str, error: ApiError) -> ServerFnError {
    tracing::error!(%error, "{context}");
    ServerFnError::new(format!("{}: {}", context, error))
}

#[server]
pub async fn get_hall() -> Result<Hall, ServerFnError> {
    let api = api().map_err(|e| upstream_error("Hall API unavailable", e))?;
    api.fetch_hall()
        .await
        .map_err(|e| upstream_error("Failed to fetch hall data", e))
}

#[server]
pub async fn get_unavailable_dates(hall_id: i64) -> Result<UnavailableDatesResponse, ServerFnError> {
    let api = api().map_err(|e| upstream_error("Hall API unavailable", e))?;
    api.fetch_unavailable_dates(hall_id)
        .await
        .map_err(|e| upstream_error("Failed to fetch unavailable dates", e))
}

#[server]
pub async fn check_coupon(coupon_code: String) -> Result<CouponCheckResponse, ServerFnError> {
    let api = api().map_err(|e| upstream_error("Hall API unavailable", e))?;
    api.check_coupon(&coupon_code)
        .await
        .map_err(|e| upstream_error("Failed to check coupon", e))
}

#[server(input = Json)]
pub async fn submit_booking(request: HallPaymentRequest) -> Result<BookHallResponse, ServerFnError> {
    let api = api().map_err(|e| upstream_error("Hall API unavailable", e))?;
    tracing::info!(
        hall_id = request.hall_id,
        days = request.number_of_days,
        amount = request.frontend_calculated_amount,
        "submitting hall booking"
    );
    api.book_hall(&request)
        .await
        .map_err(|e| upstream_error("Failed to submit booking", e))
}

#[server(input = Json)]
pub async fn confirm_payment(
    request: ConfirmStatusRequest,
) -> Result<ConfirmStatusResponse, ServerFnError> {
    let api = api().map_err(|e| upstream_error("Hall API unavailable", e))?;
    api.confirm_status(&request)
        .await
        .map_err(|e| upstream_error("Failed to confirm payment", e))
}
