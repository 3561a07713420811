use std::sync::OnceLock;

use booking_core::{
    BookHallResponse, ConfirmStatusRequest, ConfirmStatusResponse, CouponCheckRequest,
    CouponCheckResponse, Hall, HallEnvelope, HallPaymentRequest, UnavailableDatesResponse,
};
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::config::ApiConfig;

static HALL_API: OnceLock<HallApi> = OnceLock::new();

pub mod endpoints {
    pub const HALL: &str = "get_hall.php";
    pub const UNAVAILABLE_DATES: &str = "get_unavailable_datez.php";
    pub const CHECK_COUPON: &str = "check_coupon.php";
    pub const BOOK_HALL: &str = "book_hall_az.php";
    pub const CONFIRM_STATUS: &str = "confirm_status.php";
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} responded with HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("hall API client already initialized")]
    AlreadyInitialized,
    #[error("hall API client not initialized. Call init_api() first.")]
    NotInitialized,
}

/// Thin JSON client for the upstream PHP endpoints.
#[derive(Debug, Clone)]
pub struct HallApi {
    client: Client,
    config: ApiConfig,
}

impl HallApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn fetch_hall(&self) -> Result<Hall, ApiError> {
        let envelope: HallEnvelope = self
            .send(endpoints::HALL, self.client.get(self.config.endpoint(endpoints::HALL)))
            .await?;
        Ok(envelope.into())
    }

    pub async fn fetch_unavailable_dates(
        &self,
        hall_id: i64,
    ) -> Result<UnavailableDatesResponse, ApiError> {
        let request = self
            .client
            .get(self.config.endpoint(endpoints::UNAVAILABLE_DATES))
            .query(&[("hallId", hall_id)]);
        self.send(endpoints::UNAVAILABLE_DATES, request).await
    }

    pub async fn check_coupon(&self, coupon_code: &str) -> Result<CouponCheckResponse, ApiError> {
        let body = CouponCheckRequest {
            coupon_code: coupon_code.to_string(),
        };
        self.post_json(endpoints::CHECK_COUPON, &body).await
    }

    pub async fn book_hall(&self, request: &HallPaymentRequest) -> Result<BookHallResponse, ApiError> {
        self.post_json(endpoints::BOOK_HALL, request).await
    }

    pub async fn confirm_status(
        &self,
        request: &ConfirmStatusRequest,
    ) -> Result<ConfirmStatusResponse, ApiError> {
        self.post_json(endpoints::CONFIRM_STATUS, request).await
    }

    async fn post_json<B, T>(&self, endpoint: &'static str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.config.endpoint(endpoint)).json(body);
        self.send(endpoint, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        tracing::debug!(endpoint, "calling hall API");

        let response = request
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Request { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint, %status, "hall API returned an error status");
            return Err(ApiError::Status { endpoint, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })
    }
}

pub fn init_api(config: ApiConfig) -> Result<(), ApiError> {
    let api = HallApi::new(config)?;
    HALL_API.set(api).map_err(|_| ApiError::AlreadyInitialized)
}

pub fn api() -> Result<&'static HallApi, ApiError> {
    HALL_API.get().ok_or(ApiError::NotInitialized)
}
