//! Budget estimator: splits a total across typical cost heads.

use serde::Serialize;
use utoipa::ToSchema;

use super::EventType;
use super::booking::MIN_BUDGET;
use super::currency::format_inr;

/// Largest budget the estimator accepts (₹1 crore).
pub const MAX_ESTIMATE_BUDGET: u64 = 10_000_000;

/// One cost head of an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BudgetLine {
    /// Cost head name.
    pub name: &'static str,
    /// Share of the total, in percent.
    pub percent: u8,
    /// Rupees allocated to this head.
    pub amount: u64,
    /// Amount formatted as INR.
    pub formatted: String,
    /// What the head covers.
    pub description: &'static str,
}

/// Error returned for budgets outside the estimator range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("budget must be between ₹9,999 and ₹1,00,00,000")]
pub struct BudgetOutOfRange;

type Share = (&'static str, u8, &'static str);

const WEDDING: &[Share] = &[
    ("Venue & Food", 45, "Banquet charges, catering, and premium beverages."),
    ("Decor & Production", 20, "Floral design, stage setup, lighting, and sound."),
    ("Media (Photo/Video)", 15, "Cinematography, drone shots, and albums."),
    ("Attire & Makeup", 10, "Bridal wear, grooming, and celebrity MUAs."),
    ("Entertainment", 10, "DJ, live bands, and Sangeet choreography."),
];

const CORPORATE: &[Share] = &[
    ("Venue & Logistics", 40, "Hall rental, transport, and accommodation."),
    ("Tech & AV", 25, "LED walls, sound systems, and live streaming."),
    ("F&B", 20, "Gala dinners, high tea, and refreshments."),
    ("Gifting", 15, "Delegate kits, hampers, and branding."),
];

const GENERAL: &[Share] = &[
    ("Venue", 30, "Location rental costs."),
    ("Decor", 30, "Theming and floral setup."),
    ("Food", 30, "Catering services."),
    ("Misc", 10, "Contingency and extras."),
];

/// Splits `total` rupees across the cost heads for `event_type`.
///
/// # Errors
///
/// Returns [`BudgetOutOfRange`] unless `total` lies in
/// `MIN_BUDGET..=MAX_ESTIMATE_BUDGET`.
pub fn estimate(total: u64, event_type: EventType) -> Result<Vec<BudgetLine>, BudgetOutOfRange> {
    if !(MIN_BUDGET..=MAX_ESTIMATE_BUDGET).contains(&total) {
        return Err(BudgetOutOfRange);
    }
    let shares = match event_type {
        EventType::Wedding => WEDDING,
        EventType::Corporate => CORPORATE,
        _ => GENERAL,
    };
    Ok(shares
        .iter()
        .map(|&(name, percent, description)| {
            let amount = total * u64::from(percent) / 100;
            BudgetLine {
                name,
                percent,
                amount,
                formatted: format_inr(amount),
                description,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_distribution_sums_to_one_hundred() {
        for shares in [WEDDING, CORPORATE, GENERAL] {
            let total: u32 = shares.iter().map(|&(_, p, _)| u32::from(p)).sum();
            assert_eq!(total, 100);
        }
    }

    #[test]
    fn wedding_split() {
        let lines = estimate(500_000, EventType::Wedding).unwrap_or_default();
        assert_eq!(lines.len(), 5);
        let venue = lines.iter().find(|l| l.name == "Venue & Food");
        assert_eq!(venue.map(|l| l.amount), Some(225_000));
        assert_eq!(venue.map(|l| l.formatted.as_str()), Some("₹2,25,000.00"));
    }

    #[test]
    fn birthday_and_concert_use_general_split() {
        let birthday = estimate(100_000, EventType::Birthday).unwrap_or_default();
        let concert = estimate(100_000, EventType::Concert).unwrap_or_default();
        assert_eq!(birthday, concert);
        assert_eq!(birthday.len(), 4);
    }

    #[test]
    fn out_of_range_budgets_are_rejected() {
        assert_eq!(estimate(9_998, EventType::Wedding), Err(BudgetOutOfRange));
        assert_eq!(estimate(10_000_001, EventType::Wedding), Err(BudgetOutOfRange));
        assert!(estimate(MAX_ESTIMATE_BUDGET, EventType::Corporate).is_ok());
    }
}
