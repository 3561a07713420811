use serde::{Deserialize, Serialize};

use crate::pricing::clamp_discount;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CouponCheckRequest {
    pub coupon_code: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CouponCheckResponse {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub discount_percentage: f64,
}

impl CouponCheckResponse {
    /// The usable percentage, if the coupon is valid and actually discounts something.
    pub fn discount(&self) -> Option<f64> {
        if self.valid && self.discount_percentage > 0.0 {
            Some(clamp_discount(self.discount_percentage))
        } else {
            None
        }
    }
}

/// Trimmed code, or `None` when there is nothing worth looking up.
pub fn normalize_coupon_code(raw: &str) -> Option<String> {
    let code = raw.trim();
    if code.is_empty() {
        None
    } else {
        Some(code.to_string())
    }
}

/// Identifies one coupon lookup. Later lookups get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CouponTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CouponOutcome {
    /// Store this percentage and recompute.
    Applied(f64),
    /// Reset the discount to zero and recompute.
    Cleared,
    /// A newer lookup was issued after this one; ignore it.
    Stale,
}

/// Orders coupon lookups so an overtaken response can't clobber a newer one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CouponResolver {
    issued: u64,
    resolved: u64,
}

impl CouponResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> CouponTicket {
        self.issued += 1;
        CouponTicket(self.issued)
    }

    /// True while the most recent lookup has not come back.
    pub fn is_pending(&self) -> bool {
        self.resolved < self.issued
    }

    pub fn resolve<E>(
        &mut self,
        ticket: CouponTicket,
        result: Result<CouponCheckResponse, E>,
    ) -> CouponOutcome {
        if ticket.0 < self.issued {
            return CouponOutcome::Stale;
        }
        self.resolved = ticket.0;

        match result {
            Ok(response) => response
                .discount()
                .map_or(CouponOutcome::Cleared, CouponOutcome::Applied),
            Err(_) => CouponOutcome::Cleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hall::Hall;
    use crate::pricing::quote;
    use crate::validation::DateSelection;
    use crate::UnavailableDateIndex;
    use chrono::NaiveDate;

    fn ok(valid: bool, discount_percentage: f64) -> Result<CouponCheckResponse, String> {
        Ok(CouponCheckResponse {
            valid,
            discount_percentage,
        })
    }

    #[test]
    fn normalizes_codes() {
        assert_eq!(normalize_coupon_code("  SAVE10 "), Some("SAVE10".to_string()));
        assert_eq!(normalize_coupon_code("   "), None);
        assert_eq!(normalize_coupon_code(""), None);
    }

    #[test]
    fn request_uses_camel_case() {
        let body = serde_json::to_value(CouponCheckRequest {
            coupon_code: "SAVE10".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"couponCode": "SAVE10"}));
    }

    #[test]
    fn valid_coupon_applies_percentage() {
        let mut resolver = CouponResolver::new();
        let ticket = resolver.issue();
        assert!(resolver.is_pending());

        assert_eq!(resolver.resolve(ticket, ok(true, 10.0)), CouponOutcome::Applied(10.0));
        assert!(!resolver.is_pending());
    }

    #[test]
    fn invalid_zero_or_failed_lookups_clear_discount() {
        let mut resolver = CouponResolver::new();

        let ticket = resolver.issue();
        assert_eq!(resolver.resolve(ticket, ok(false, 25.0)), CouponOutcome::Cleared);

        let ticket = resolver.issue();
        assert_eq!(resolver.resolve(ticket, ok(true, 0.0)), CouponOutcome::Cleared);

        let ticket = resolver.issue();
        let failed: Result<CouponCheckResponse, String> = Err("HTTP 500".to_string());
        assert_eq!(resolver.resolve(ticket, failed), CouponOutcome::Cleared);
    }

    #[test]
    fn overtaken_response_is_discarded() {
        let mut resolver = CouponResolver::new();
        let first = resolver.issue();
        let second = resolver.issue();

        assert_eq!(resolver.resolve(second, ok(true, 20.0)), CouponOutcome::Applied(20.0));
        assert_eq!(resolver.resolve(first, ok(true, 5.0)), CouponOutcome::Stale);
    }

    #[test]
    fn stale_response_keeps_newer_lookup_pending() {
        let mut resolver = CouponResolver::new();
        let first = resolver.issue();
        let _second = resolver.issue();

        assert_eq!(resolver.resolve(first, ok(true, 5.0)), CouponOutcome::Stale);
        assert!(resolver.is_pending());
    }

    #[test]
    fn failed_lookup_reverts_to_undiscounted_total() {
        let hall = Hall {
            id: 3,
            name: "Hall".to_string(),
            image: String::new(),
            description: String::new(),
            price_per_day: 50_000,
            charges_fee: 2_000,
        };
        let selection = DateSelection::new(
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
        );
        let index = UnavailableDateIndex::default();
        let mut resolver = CouponResolver::new();

        let ticket = resolver.issue();
        let mut discount = match resolver.resolve(ticket, ok(true, 10.0)) {
            CouponOutcome::Applied(percentage) => percentage,
            other => panic!("unexpected outcome {other:?}"),
        };
        assert_eq!(quote(&selection, &hall, &index, discount).calculation().total_price, 137_000);

        let failed: Result<CouponCheckResponse, String> = Err("timeout".to_string());
        let ticket = resolver.issue();
        if resolver.resolve(ticket, failed) == CouponOutcome::Cleared {
            discount = 0.0;
        }
        let recomputed = quote(&selection, &hall, &index, discount);
        assert_eq!(recomputed.calculation().total_price, 152_000);
        assert_eq!(recomputed.discount_amount(), 0);
    }
}
