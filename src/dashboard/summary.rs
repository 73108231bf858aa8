use tracing::warn;

use crate::bill::Bill;
use crate::money::{is_corrupted_amount, CORRUPTION_FACTOR};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub total_amount: f64,
    pub average_age: f64,
}

/// Aggregate a filtered, unsorted set of bills.
///
/// Amounts in `(0, 0.1)` are scaled by 10 000 a second time here. Amounts
/// parsed from strings never went through the parser's numeric correction.
pub fn summarize(bills: &[Bill]) -> Summary {
    let count = bills.len();
    let has_corrupted = bills.iter().any(|b| is_corrupted_amount(b.amount));
    if has_corrupted {
        warn!("summary contains amounts below 0.1, scaling them by 10000");
    }

    let total_amount: f64 = bills
        .iter()
        .map(|b| {
            if has_corrupted && is_corrupted_amount(b.amount) {
                b.amount * CORRUPTION_FACTOR
            } else {
                b.amount
            }
        })
        .sum();

    let average_age = if count > 0 {
        bills.iter().map(|b| f64::from(b.days_overdue)).sum::<f64>() / count as f64
    } else {
        0.0
    };

    Summary {
        count,
        total_amount,
        average_age,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_bill;

    #[test]
    fn test_empty() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn test_totals_and_average() {
        let bills = vec![test_bill("a", 15, 1500.0), test_bill("b", 100, 2800.5)];
        let summary = summarize(&bills);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_amount, 4300.5);
        assert_eq!(summary.average_age, 57.5);
    }

    #[test]
    fn test_aggregate_correction() {
        let bills = vec![test_bill("a", 10, 0.05), test_bill("b", 20, 50.0)];
        let summary = summarize(&bills);
        assert!((summary.total_amount - 550.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_and_boundary_amounts_are_not_scaled() {
        let bills = vec![
            test_bill("a", 10, 0.1),
            test_bill("b", 20, -0.05),
            test_bill("c", 30, 0.0),
        ];
        let summary = summarize(&bills);
        assert!((summary.total_amount - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_order_does_not_matter() {
        let bills = vec![
            test_bill("a", 3, 10.0),
            test_bill("b", 70, 0.02),
            test_bill("c", 95, 7.25),
        ];
        let mut reversed = bills.clone();
        reversed.reverse();
        let a = summarize(&bills);
        let b = summarize(&reversed);
        assert_eq!(a.count, b.count);
        assert!((a.total_amount - b.total_amount).abs() < 1e-9);
        assert_eq!(a.average_age, b.average_age);
    }
}
