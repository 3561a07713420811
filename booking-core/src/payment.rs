use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::CustomerContact;
use crate::submission::BookingData;

/// Outcome reported by the payment-status check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Successful,
    Pending,
    Failed,
    NetworkError,
    Unknown(String),
}

impl PaymentStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "SUCCESSFUL" => PaymentStatus::Successful,
            "PENDING" => PaymentStatus::Pending,
            "FAILED" => PaymentStatus::Failed,
            "NETWORK_ERROR" => PaymentStatus::NetworkError,
            other => PaymentStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Successful => "SUCCESSFUL",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::NetworkError => "NETWORK_ERROR",
            PaymentStatus::Unknown(raw) => raw,
        }
    }

    pub fn display(&self) -> StatusDisplay {
        match self {
            PaymentStatus::Successful => StatusDisplay {
                title: "Payment Successful!",
                message: "Your payment has been confirmed and your booking is now active.",
                tone: StatusTone::Success,
            },
            PaymentStatus::Pending => StatusDisplay {
                title: "Payment Pending",
                message: "Your payment is being processed. Please allow up to 10 minutes for confirmation.",
                tone: StatusTone::Info,
            },
            PaymentStatus::Failed => StatusDisplay {
                title: "Payment Failed",
                message: "Your payment could not be processed. Please check your details and try again.",
                tone: StatusTone::Danger,
            },
            PaymentStatus::NetworkError => StatusDisplay {
                title: "Network Error",
                message: "We encountered a network error while processing your payment. Please check your email for updates.",
                tone: StatusTone::Warning,
            },
            PaymentStatus::Unknown(_) => StatusDisplay::submitted(),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(raw: String) -> Self {
        PaymentStatus::parse(&raw)
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Info,
    Danger,
    Warning,
    Neutral,
}

impl StatusTone {
    pub fn class_name(&self) -> &'static str {
        match self {
            StatusTone::Success => "tone-success",
            StatusTone::Info => "tone-info",
            StatusTone::Danger => "tone-danger",
            StatusTone::Warning => "tone-warning",
            StatusTone::Neutral => "tone-neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    pub title: &'static str,
    pub message: &'static str,
    pub tone: StatusTone,
}

impl StatusDisplay {
    /// Shown when the check returned no status or one we don't recognise.
    pub fn submitted() -> Self {
        StatusDisplay {
            title: "Booking Submitted",
            message: "Your booking has been submitted. We will contact you shortly.",
            tone: StatusTone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmStatusRequest {
    pub transaction_ref: String,
    pub selected_date_range: [NaiveDate; 2],
    pub customer_email: String,
    pub customer_fullname: String,
    pub hall_name: String,
    pub number_of_days: u32,
    pub base_booking_fee: i64,
    pub final_booking_amount: i64,
}

impl ConfirmStatusRequest {
    /// A booking without a server reference gets `TREF<unix millis>`.
    pub fn for_booking(booking: &BookingData, contact: &CustomerContact, now_millis: i64) -> Self {
        let transaction_ref = if booking.transaction_reference.trim().is_empty() {
            format!("TREF{now_millis}")
        } else {
            booking.transaction_reference.clone()
        };

        Self {
            transaction_ref,
            selected_date_range: [booking.from_date, booking.to_date],
            customer_email: contact.email.clone(),
            customer_fullname: contact.fullname.clone(),
            hall_name: booking.hall_name.clone(),
            number_of_days: booking.days,
            base_booking_fee: booking.base_amount,
            final_booking_amount: booking.total,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmStatusResponse {
    #[serde(default)]
    pub transaction_status_api: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ConfirmStatusResponse {
    pub fn status(&self) -> Option<PaymentStatus> {
        self.transaction_status_api
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(PaymentStatus::parse)
    }
}

/// What the final page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmData {
    pub hall_name: String,
    pub days: u32,
    pub total: i64,
    pub base_amount: i64,
    pub discount: i64,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub charges: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConfirmData {
    pub fn from_confirmation(
        booking: &BookingData,
        request: &ConfirmStatusRequest,
        response: &ConfirmStatusResponse,
    ) -> Self {
        Self {
            hall_name: request.hall_name.clone(),
            days: request.number_of_days,
            total: request.final_booking_amount,
            base_amount: request.base_booking_fee,
            discount: booking.discount,
            from_date: booking.from_date,
            to_date: booking.to_date,
            charges: booking.charges,
            status: response.status(),
            transaction_reference: Some(request.transaction_ref.clone()),
            message: response.message.clone(),
        }
    }

    pub fn status_display(&self) -> StatusDisplay {
        self.status
            .as_ref()
            .map_or_else(StatusDisplay::submitted, PaymentStatus::display)
    }

    pub fn status_label(&self) -> &str {
        self.status.as_ref().map_or("UNKNOWN", PaymentStatus::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(transaction_reference: &str) -> BookingData {
        BookingData {
            hall_name: "Race Course Hall".to_string(),
            days: 3,
            price_per_day: 50_000,
            charges: 2_000,
            total: 137_000,
            name: "Amina Bello".to_string(),
            phone: "08012345678".to_string(),
            base_amount: 150_000,
            discount: 15_000,
            booking_id: "981".to_string(),
            account_number: "0123456789".to_string(),
            bank_name: "Zenith Bank".to_string(),
            account_name: "KDSG Markets".to_string(),
            from_date: date(2025, 1, 10),
            to_date: date(2025, 1, 12),
            transaction_reference: transaction_reference.to_string(),
        }
    }

    fn contact() -> CustomerContact {
        CustomerContact {
            email: "amina@example.com".to_string(),
            fullname: "Amina Bello".to_string(),
        }
    }

    #[test]
    fn parses_known_statuses() {
        assert_eq!(PaymentStatus::parse("SUCCESSFUL"), PaymentStatus::Successful);
        assert_eq!(PaymentStatus::parse("PENDING"), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::parse("FAILED"), PaymentStatus::Failed);
        assert_eq!(PaymentStatus::parse("NETWORK_ERROR"), PaymentStatus::NetworkError);
        assert_eq!(
            PaymentStatus::parse("REVERSED"),
            PaymentStatus::Unknown("REVERSED".to_string())
        );
    }

    #[test]
    fn each_status_has_its_own_presentation() {
        assert_eq!(PaymentStatus::Successful.display().tone, StatusTone::Success);
        assert_eq!(PaymentStatus::Pending.display().title, "Payment Pending");
        assert_eq!(PaymentStatus::Failed.display().tone, StatusTone::Danger);
        assert_eq!(PaymentStatus::NetworkError.display().title, "Network Error");
        assert_eq!(
            PaymentStatus::Unknown("X".to_string()).display(),
            StatusDisplay::submitted()
        );
    }

    #[test]
    fn request_keeps_server_reference() {
        let request = ConfirmStatusRequest::for_booking(&booking("TX-77"), &contact(), 1_700_000_000_000);

        assert_eq!(request.transaction_ref, "TX-77");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "transactionRef": "TX-77",
                "selectedDateRange": ["2025-01-10", "2025-01-12"],
                "customerEmail": "amina@example.com",
                "customerFullname": "Amina Bello",
                "hallName": "Race Course Hall",
                "numberOfDays": 3,
                "baseBookingFee": 150000,
                "finalBookingAmount": 137000
            })
        );
    }

    #[test]
    fn request_falls_back_to_timestamp_reference() {
        let request = ConfirmStatusRequest::for_booking(&booking(""), &contact(), 1_700_000_000_123);
        assert_eq!(request.transaction_ref, "TREF1700000000123");
    }

    #[test]
    fn confirm_data_carries_status_and_amounts() {
        let booking = booking("TX-77");
        let request = ConfirmStatusRequest::for_booking(&booking, &contact(), 0);
        let response: ConfirmStatusResponse = serde_json::from_str(
            r#"{"transactionStatusApi": "PENDING", "message": "Awaiting settlement"}"#,
        )
        .unwrap();

        let confirm = ConfirmData::from_confirmation(&booking, &request, &response);

        assert_eq!(confirm.status, Some(PaymentStatus::Pending));
        assert_eq!(confirm.status_label(), "PENDING");
        assert_eq!(confirm.transaction_reference.as_deref(), Some("TX-77"));
        assert_eq!(confirm.total, 137_000);
        assert_eq!(confirm.discount, 15_000);
        assert_eq!(confirm.message.as_deref(), Some("Awaiting settlement"));
    }

    #[test]
    fn blank_status_renders_default_display() {
        let booking = booking("TX-77");
        let request = ConfirmStatusRequest::for_booking(&booking, &contact(), 0);
        let response: ConfirmStatusResponse =
            serde_json::from_str(r#"{"transactionStatusApi": ""}"#).unwrap();

        let confirm = ConfirmData::from_confirmation(&booking, &request, &response);

        assert_eq!(confirm.status, None);
        assert_eq!(confirm.status_label(), "UNKNOWN");
        assert_eq!(confirm.status_display(), StatusDisplay::submitted());
    }

    #[test]
    fn status_round_trips_as_plain_string() {
        let json = serde_json::to_string(&PaymentStatus::NetworkError).unwrap();
        assert_eq!(json, r#""NETWORK_ERROR""#);
    }
}
