use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::hall::Hall;
use crate::pricing::Quote;
use crate::validation::DateSelection;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{11}$").expect("phone pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    CustomerFullname,
    CustomerEmail,
    CustomerPhone,
    DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: FormField, message: &'static str) -> Self {
        Self { field, message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("booking form has {} invalid field(s)", .0.len())]
    InvalidFields(Vec<FieldError>),
}

impl SubmissionError {
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            SubmissionError::InvalidFields(errors) => errors,
        }
    }

    pub fn message_for(&self, field: FormField) -> Option<&'static str> {
        self.field_errors()
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    pub customer_fullname: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub selection: DateSelection,
}

impl BookingForm {
    /// Field-level checks. The date range needs both ends and a non-empty quote.
    pub fn validate(&self, quote: &Quote) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.customer_fullname.trim().is_empty() {
            errors.push(FieldError::new(FormField::CustomerFullname, "Name is required"));
        }

        let email = self.customer_email.trim();
        if email.is_empty() {
            errors.push(FieldError::new(FormField::CustomerEmail, "Email is required"));
        } else if !EMAIL_PATTERN.is_match(email) {
            errors.push(FieldError::new(FormField::CustomerEmail, "Email is invalid"));
        }

        let phone: String = self
            .customer_phone
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect();
        if phone.is_empty() {
            errors.push(FieldError::new(FormField::CustomerPhone, "Phone number is required"));
        } else if !PHONE_PATTERN.is_match(&phone) {
            errors.push(FieldError::new(
                FormField::CustomerPhone,
                "Phone number must be 11 digits",
            ));
        }

        if !self.selection.is_complete() {
            errors.push(FieldError::new(FormField::DateRange, "Please select booking dates"));
        } else if quote.calculation().days == 0 {
            errors.push(FieldError::new(FormField::DateRange, "Please select valid booking dates"));
        }

        errors
    }
}

/// Body of the book-hall call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HallPaymentRequest {
    pub base_booking_fee: i64,
    pub coupon_code: String,
    pub customer_email: String,
    pub customer_fullname: String,
    pub customer_phone: String,
    pub discount_amount: i64,
    pub end_date: NaiveDate,
    pub frontend_calculated_amount: i64,
    pub hall_id: i64,
    pub number_of_days: u32,
    pub start_date: NaiveDate,
}

/// Assembles the payment request, or reports why the form can't be sent yet.
pub fn build_payment_request(
    form: &BookingForm,
    hall: &Hall,
    quote: &Quote,
    coupon_code: Option<&str>,
) -> Result<HallPaymentRequest, SubmissionError> {
    let errors = form.validate(quote);
    if !errors.is_empty() {
        return Err(SubmissionError::InvalidFields(errors));
    }

    let (Some((start_date, end_date)), Some(breakdown)) = (form.selection.bounds(), quote.breakdown)
    else {
        return Err(SubmissionError::InvalidFields(vec![FieldError::new(
            FormField::DateRange,
            "Please select valid booking dates",
        )]));
    };

    Ok(HallPaymentRequest {
        base_booking_fee: hall.price_per_day * i64::from(breakdown.days),
        coupon_code: coupon_code.map(str::trim).unwrap_or_default().to_string(),
        customer_email: form.customer_email.trim().to_string(),
        customer_fullname: form.customer_fullname.trim().to_string(),
        customer_phone: form.customer_phone.trim().to_string(),
        discount_amount: breakdown.discount_amount,
        end_date,
        frontend_calculated_amount: breakdown.total_price,
        hall_id: hall.id,
        number_of_days: breakdown.days,
        start_date,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDetails {
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub transaction_reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookHallResponse {
    #[serde(default, deserialize_with = "string_or_number")]
    pub booking_id: Option<String>,
    #[serde(default)]
    pub data: Option<TransferDetails>,
}

// Booking ids come back as either JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(id)) => Some(id),
        Some(serde_json::Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

/// The accepted booking carried from the hall page to the transfer page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingData {
    pub hall_name: String,
    pub days: u32,
    pub price_per_day: i64,
    pub charges: i64,
    pub total: i64,
    pub name: String,
    pub phone: String,
    pub base_amount: i64,
    pub discount: i64,
    pub booking_id: String,
    pub account_number: String,
    pub bank_name: String,
    pub account_name: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(default)]
    pub transaction_reference: String,
}

impl BookingData {
    pub fn from_submission(
        hall: &Hall,
        request: &HallPaymentRequest,
        response: &BookHallResponse,
    ) -> Self {
        let details = response.data.clone().unwrap_or_default();

        Self {
            hall_name: hall.name.clone(),
            days: request.number_of_days,
            price_per_day: hall.price_per_day,
            charges: hall.charges_fee,
            total: request.frontend_calculated_amount,
            name: request.customer_fullname.clone(),
            phone: request.customer_phone.clone(),
            base_amount: request.base_booking_fee,
            discount: request.discount_amount,
            booking_id: response.booking_id.clone().unwrap_or_default(),
            account_number: details.account_number.unwrap_or_default(),
            bank_name: details.bank_name.unwrap_or_default(),
            account_name: details.account_name.unwrap_or_default(),
            from_date: request.start_date,
            to_date: request.end_date,
            transaction_reference: details.transaction_reference.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::quote;
    use crate::UnavailableDateIndex;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hall() -> Hall {
        Hall {
            id: 12,
            name: "Race Course Hall".to_string(),
            image: String::new(),
            description: String::new(),
            price_per_day: 50_000,
            charges_fee: 2_000,
        }
    }

    fn form(selection: DateSelection) -> BookingForm {
        BookingForm {
            customer_fullname: "Amina Bello".to_string(),
            customer_email: "amina@example.com".to_string(),
            customer_phone: "0801 234 5678".to_string(),
            selection,
        }
    }

    #[test]
    fn builds_request_from_form_and_quote() {
        let form = form(DateSelection::new(date(2025, 1, 10), date(2025, 1, 12)));
        let quote = quote(&form.selection, &hall(), &UnavailableDateIndex::default(), 10.0);

        let request = build_payment_request(&form, &hall(), &quote, Some(" SAVE10 ")).unwrap();

        assert_eq!(request.base_booking_fee, 150_000);
        assert_eq!(request.discount_amount, 15_000);
        assert_eq!(request.frontend_calculated_amount, 137_000);
        assert_eq!(request.number_of_days, 3);
        assert_eq!(request.coupon_code, "SAVE10");
        assert_eq!(request.hall_id, 12);
    }

    #[test]
    fn request_serializes_with_api_field_names() {
        let form = form(DateSelection::new(date(2025, 1, 10), date(2025, 1, 12)));
        let quote = quote(&form.selection, &hall(), &UnavailableDateIndex::default(), 0.0);
        let request = build_payment_request(&form, &hall(), &quote, None).unwrap();

        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "baseBookingFee": 150000,
                "couponCode": "",
                "customerEmail": "amina@example.com",
                "customerFullname": "Amina Bello",
                "customerPhone": "0801 234 5678",
                "discountAmount": 0,
                "endDate": "2025-01-12",
                "frontendCalculatedAmount": 152000,
                "hallId": 12,
                "numberOfDays": 3,
                "startDate": "2025-01-10"
            })
        );
    }

    #[test]
    fn incomplete_dates_block_submission() {
        let mut selection = DateSelection::default();
        selection.select_day(date(2025, 1, 10));
        let form = form(selection);
        let quote = quote(&form.selection, &hall(), &UnavailableDateIndex::default(), 0.0);

        let error = build_payment_request(&form, &hall(), &quote, None).unwrap_err();

        assert_eq!(error.message_for(FormField::DateRange), Some("Please select booking dates"));
    }

    #[test]
    fn zero_day_quote_blocks_submission_even_with_valid_fields() {
        let form = form(DateSelection::new(date(2025, 1, 12), date(2025, 1, 10)));
        let quote = quote(&form.selection, &hall(), &UnavailableDateIndex::default(), 0.0);

        let error = build_payment_request(&form, &hall(), &quote, None).unwrap_err();

        assert_eq!(error.field_errors().len(), 1);
        assert_eq!(
            error.message_for(FormField::DateRange),
            Some("Please select valid booking dates")
        );
    }

    #[test]
    fn reports_every_invalid_contact_field() {
        let mut form = form(DateSelection::new(date(2025, 1, 10), date(2025, 1, 10)));
        form.customer_fullname = "  ".to_string();
        form.customer_email = "not-an-email".to_string();
        form.customer_phone = "12345".to_string();
        let quote = quote(&form.selection, &hall(), &UnavailableDateIndex::default(), 0.0);

        let errors = form.validate(&quote);

        assert_eq!(
            errors.iter().map(|error| error.field).collect::<Vec<_>>(),
            vec![FormField::CustomerFullname, FormField::CustomerEmail, FormField::CustomerPhone]
        );
        assert_eq!(errors[1].message, "Email is invalid");
        assert_eq!(errors[2].message, "Phone number must be 11 digits");
    }

    #[test]
    fn merges_server_transfer_details() {
        let form = form(DateSelection::new(date(2025, 1, 10), date(2025, 1, 12)));
        let quote = quote(&form.selection, &hall(), &UnavailableDateIndex::default(), 10.0);
        let request = build_payment_request(&form, &hall(), &quote, Some("SAVE10")).unwrap();
        let response: BookHallResponse = serde_json::from_str(
            r#"{
                "bookingId": 981,
                "data": {
                    "accountNumber": "0123456789",
                    "bankName": "Zenith Bank",
                    "accountName": "KDSG Markets",
                    "transactionReference": "TX-77"
                }
            }"#,
        )
        .unwrap();

        let booking = BookingData::from_submission(&hall(), &request, &response);

        assert_eq!(booking.booking_id, "981");
        assert_eq!(booking.bank_name, "Zenith Bank");
        assert_eq!(booking.transaction_reference, "TX-77");
        assert_eq!(booking.total, 137_000);
        assert_eq!(booking.base_amount, 150_000);
        assert_eq!(booking.discount, 15_000);
        assert_eq!(booking.charges, 2_000);
        assert_eq!(booking.from_date, date(2025, 1, 10));
    }

    #[test]
    fn missing_transfer_details_default_to_empty() {
        let form = form(DateSelection::new(date(2025, 1, 10), date(2025, 1, 10)));
        let quote = quote(&form.selection, &hall(), &UnavailableDateIndex::default(), 0.0);
        let request = build_payment_request(&form, &hall(), &quote, None).unwrap();
        let response: BookHallResponse =
            serde_json::from_str(r#"{"bookingId": "BK-1", "data": {"bankName": null}}"#).unwrap();

        let booking = BookingData::from_submission(&hall(), &request, &response);

        assert_eq!(booking.booking_id, "BK-1");
        assert_eq!(booking.account_number, "");
        assert_eq!(booking.bank_name, "");
        assert_eq!(booking.transaction_reference, "");
    }
}
