//! Rupee formatting with Indian digit grouping.

/// Formats an amount as `₹12,34,567`: the last three digits form one
/// group, every group to the left of it holds two.
pub fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_amounts_have_no_separator() {
        assert_eq!(format_rupees(0), "₹0");
        assert_eq!(format_rupees(999), "₹999");
    }

    #[test]
    fn thousands_use_single_separator() {
        assert_eq!(format_rupees(1_000), "₹1,000");
        assert_eq!(format_rupees(99_999), "₹99,999");
    }

    #[test]
    fn lakhs_and_crores_group_by_two() {
        assert_eq!(format_rupees(550_000), "₹5,50,000");
        assert_eq!(format_rupees(1_234_567), "₹12,34,567");
        assert_eq!(format_rupees(12_000_000), "₹1,20,00,000");
    }
}
