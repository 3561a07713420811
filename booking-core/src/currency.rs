const NAIRA_SIGN: char = '₦';

/// Formats whole naira the way the `en-NG` locale prints NGN with no fraction digits.
pub fn format_naira(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-{NAIRA_SIGN}{grouped}")
    } else {
        format!("{NAIRA_SIGN}{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::format_naira;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_naira(0), "₦0");
        assert_eq!(format_naira(950), "₦950");
        assert_eq!(format_naira(2000), "₦2,000");
        assert_eq!(format_naira(137000), "₦137,000");
        assert_eq!(format_naira(1_250_000), "₦1,250,000");
    }

    #[test]
    fn negative_amounts_keep_sign_before_symbol() {
        assert_eq!(format_naira(-2500), "-₦2,500");
    }

    #[test]
    fn handles_extremes() {
        assert_eq!(format_naira(i64::MIN), "-₦9,223,372,036,854,775,808");
    }
}
