use serde::{Deserialize, Serialize};

use crate::availability::UnavailableDateIndex;
use crate::hall::Hall;
use crate::validation::{validate_range, DateRangeError, DateSelection};

/// The summary the form shows. `days == 0` is the empty state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceCalculation {
    pub days: u32,
    pub total_price: i64,
}

impl PriceCalculation {
    pub const fn empty() -> Self {
        Self {
            days: 0,
            total_price: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub days: u32,
    pub price_per_day: i64,
    pub base_price: i64,
    pub discount_amount: i64,
    pub charges: i64,
    pub total_price: i64,
}

impl PriceBreakdown {
    pub fn calculation(&self) -> PriceCalculation {
        PriceCalculation {
            days: self.days,
            total_price: self.total_price,
        }
    }
}

/// Out-of-range coupon percentages are pinned to `[0, 100]`.
pub fn clamp_discount(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, 100.0)
}

pub fn calculate_price(
    days: u32,
    price_per_day: i64,
    charges_fee: i64,
    discount_percentage: f64,
) -> PriceBreakdown {
    let base_price = i64::from(days).saturating_mul(price_per_day);
    let percentage = clamp_discount(discount_percentage);

    let discount_amount = if percentage > 0.0 {
        (base_price as f64 * (percentage / 100.0)).round() as i64
    } else {
        0
    };

    let total_price = base_price
        .saturating_sub(discount_amount)
        .saturating_add(charges_fee)
        .max(0);

    PriceBreakdown {
        days,
        price_per_day,
        base_price,
        discount_amount,
        charges: charges_fee,
        total_price,
    }
}

/// Result of recomputing the form's pricing after any change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quote {
    pub breakdown: Option<PriceBreakdown>,
    pub error: Option<DateRangeError>,
}

impl Quote {
    pub const fn empty() -> Self {
        Self {
            breakdown: None,
            error: None,
        }
    }

    pub fn calculation(&self) -> PriceCalculation {
        self.breakdown
            .map(|breakdown| breakdown.calculation())
            .unwrap_or_default()
    }

    pub fn discount_amount(&self) -> i64 {
        self.breakdown.map_or(0, |breakdown| breakdown.discount_amount)
    }

    pub fn is_bookable(&self) -> bool {
        !self.calculation().is_empty()
    }
}

/// Recomputes the quote from scratch. Call it after every selection, coupon or hall change.
pub fn quote(
    selection: &DateSelection,
    hall: &Hall,
    unavailable: &UnavailableDateIndex,
    discount_percentage: f64,
) -> Quote {
    let Some((start, end)) = selection.bounds() else {
        return Quote::empty();
    };

    match validate_range(start, end, unavailable) {
        Ok(days) => Quote {
            breakdown: Some(calculate_price(
                days,
                hall.price_per_day,
                hall.charges_fee,
                discount_percentage,
            )),
            error: None,
        },
        Err(error) => Quote {
            breakdown: None,
            error: Some(error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::UnavailableDateRange;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hall(price_per_day: i64, charges_fee: i64) -> Hall {
        Hall {
            id: 1,
            name: "Main Hall".to_string(),
            image: String::new(),
            description: String::new(),
            price_per_day,
            charges_fee,
        }
    }

    #[test]
    fn undiscounted_total_adds_flat_fee() {
        let breakdown = calculate_price(3, 100_000, 5_000, 0.0);

        assert_eq!(breakdown.base_price, 300_000);
        assert_eq!(breakdown.discount_amount, 0);
        assert_eq!(breakdown.total_price, 305_000);
    }

    #[test]
    fn discount_applies_to_base_price_only() {
        let breakdown = calculate_price(3, 100_000, 5_000, 10.0);

        assert_eq!(breakdown.discount_amount, 30_000);
        assert_eq!(breakdown.total_price, 275_000);
    }

    #[test]
    fn discount_is_rounded() {
        // 12.5% of 1_005 = 125.625
        assert_eq!(calculate_price(1, 1_005, 0, 12.5).discount_amount, 126);
        // 10% of 1_004 = 100.4
        assert_eq!(calculate_price(1, 1_004, 0, 10.0).discount_amount, 100);
    }

    #[test]
    fn total_never_goes_negative() {
        assert_eq!(calculate_price(2, 1_000, -1_000_000, 0.0).total_price, 0);
        assert_eq!(calculate_price(2, -500, 0, 0.0).total_price, 0);
    }

    #[test]
    fn out_of_range_discounts_are_clamped() {
        assert_eq!(calculate_price(1, 1_000, 0, 150.0).total_price, 0);
        assert_eq!(calculate_price(1, 1_000, 0, -20.0).total_price, 1_000);
        assert_eq!(calculate_price(1, 1_000, 0, f64::NAN).total_price, 1_000);
    }

    #[test]
    fn incomplete_selection_quotes_empty() {
        let mut selection = DateSelection::default();
        selection.select_day(date(2025, 1, 10));

        let quote = quote(&selection, &hall(50_000, 2_000), &UnavailableDateIndex::default(), 10.0);

        assert_eq!(quote, Quote::empty());
        assert_eq!(quote.calculation(), PriceCalculation::empty());
        assert!(!quote.is_bookable());
    }

    #[test]
    fn invalid_range_quotes_empty_with_error() {
        let selection = DateSelection::new(date(2025, 1, 12), date(2025, 1, 10));
        let quote = quote(&selection, &hall(50_000, 2_000), &UnavailableDateIndex::default(), 0.0);

        assert_eq!(quote.error, Some(DateRangeError::InvalidOrder));
        assert!(quote.calculation().is_empty());
        assert_eq!(quote.discount_amount(), 0);
    }

    #[test]
    fn blocked_range_quotes_empty_with_warning() {
        let index = UnavailableDateIndex::from_ranges(&[UnavailableDateRange::new(
            date(2025, 1, 11),
            date(2025, 1, 11),
        )]);
        let selection = DateSelection::new(date(2025, 1, 10), date(2025, 1, 12));

        let quote = quote(&selection, &hall(50_000, 2_000), &index, 0.0);

        assert_eq!(quote.error, Some(DateRangeError::ContainsUnavailableDay));
        assert_eq!(quote.calculation(), PriceCalculation::empty());
    }

    #[test]
    fn three_day_booking_with_ten_percent_coupon() {
        let mut selection = DateSelection::default();
        selection.select_day(date(2025, 1, 10));
        selection.select_day(date(2025, 1, 12));

        let quote = quote(&selection, &hall(50_000, 2_000), &UnavailableDateIndex::default(), 10.0);

        assert_eq!(quote.calculation(), PriceCalculation { days: 3, total_price: 137_000 });
        assert_eq!(quote.discount_amount(), 15_000);
    }

    #[test]
    fn recompute_is_idempotent() {
        let selection = DateSelection::new(date(2025, 4, 1), date(2025, 4, 4));
        let hall = hall(20_000, 1_500);
        let index = UnavailableDateIndex::default();

        assert_eq!(quote(&selection, &hall, &index, 5.0), quote(&selection, &hall, &index, 5.0));
    }
}
