//! Display helpers for reason strings and cost breakdowns.

/// Format a dollar amount with thousands separators, e.g. `usd(1234.5, 2)` →
/// `"$1,234.50"`. Negative amounts keep a leading minus: `"-$12"`.
pub(crate) fn usd(amount: f64, decimals: usize) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.*}", decimals, amount.abs());
    let (whole, frac) = match fixed.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac {
        Some(frac) => format!("{sign}${grouped}.{frac}"),
        None => format!("{sign}${grouped}"),
    }
}

/// Format a ratio as a percentage, e.g. `pct(0.6667, 1)` → `"66.7%"`.
pub(crate) fn pct(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_groups_thousands() {
        assert_eq!(usd(1_234_567.891, 2), "$1,234,567.89");
        assert_eq!(usd(950.0, 0), "$950");
        assert_eq!(usd(1000.0, 0), "$1,000");
    }

    #[test]
    fn usd_negative_amount() {
        assert_eq!(usd(-1500.0, 2), "-$1,500.00");
    }

    #[test]
    fn pct_formats_ratio() {
        assert_eq!(pct(0.666_666, 1), "66.7%");
        assert_eq!(pct(0.2, 0), "20%");
        assert_eq!(pct(-0.125, 1), "-12.5%");
    }
}
