//! Rupee formatting with Indian digit grouping.

/// Formats a whole-rupee amount the way `en-IN` currency formatting does:
/// `₹` prefix, last three digits grouped, then groups of two, two decimals.
///
/// ```
/// use starvnt_gateway::domain::currency::format_inr;
/// assert_eq!(format_inr(9_999), "₹9,999.00");
/// assert_eq!(format_inr(500_000), "₹5,00,000.00");
/// ```
#[must_use]
pub fn format_inr(amount: u64) -> String {
    format!("₹{}.00", group_indian(amount))
}

/// Groups the digits of `n` as `12,34,56,789`.
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
