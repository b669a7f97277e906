//! Read-side aggregation. Nothing here is stored; results are recomputed
//! from the current state on every read.

pub mod catalog;
pub mod live;

use serde::Serialize;

// Vote count for one option, in the question's option order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionCount {
    pub option: String,
    pub count: usize,
    pub percentage: u32,
}

/// `round(100 * count / total)`, or 0 when nobody has answered.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 * 100.0 / total as f64).round() as u32
}

// Pair each option with its count and share of `total`
fn option_counts(options: &[String], counts: &[usize], total: usize) -> Vec<OptionCount> {
    options
        .iter()
        .zip(counts)
        .map(|(option, &count)| OptionCount {
            option: option.clone(),
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

fn format_counts(options: &[OptionCount]) -> String {
    options
        .iter()
        .map(|o| format!("{}: {} ({}%)", o.option, o.count, o.percentage))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_zero_without_responses() {
        for count in 0..5 {
            assert_eq!(percentage(count, 0), 0);
        }
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(3, 3), 100);
        assert_eq!(percentage(0, 7), 0);
    }

    #[test]
    fn percentage_matches_formula_for_all_counts() {
        for total in 1..=40usize {
            for count in 0..=total {
                let expected = (100.0 * count as f64 / total as f64).round() as u32;
                assert_eq!(percentage(count, total), expected);
            }
        }
    }

    #[test]
    fn counts_keep_option_order() {
        let options = vec!["B".to_string(), "A".to_string()];
        let counted = option_counts(&options, &[1, 3], 4);

        assert_eq!(counted[0].option, "B");
        assert_eq!(counted[0].percentage, 25);
        assert_eq!(counted[1].option, "A");
        assert_eq!(counted[1].percentage, 75);
        assert_eq!(format_counts(&counted), "B: 1 (25%), A: 3 (75%)");
    }
}
