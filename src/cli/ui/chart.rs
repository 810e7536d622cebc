//! Text rendering of the per-category expense breakdown.

use crate::cli::output::current_preferences;
use crate::core::services::CategoryTotals;
use crate::domain::format_amount;

const BAR_WIDTH: usize = 30;

/// One line per category: name, proportional bar, total, and share.
pub fn render_breakdown(totals: &CategoryTotals, currency: &str) -> String {
    let max = totals
        .iter()
        .map(|entry| entry.total)
        .fold(0.0_f64, f64::max);
    let fill = if current_preferences().plain_mode { '#' } else { '█' };
    let shares = totals.shares();

    totals
        .iter()
        .zip(shares)
        .map(|(entry, (_, share))| {
            let length = if max > 0.0 {
                ((entry.total / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let bar: String = std::iter::repeat(fill).take(length).collect();
            format!(
                "{:<9} {:<width$} {} {} ({:.1}%)",
                entry.category.as_str(),
                bar,
                format_amount(entry.total),
                currency,
                share,
                width = BAR_WIDTH
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::SummaryService;
    use crate::domain::{Category, TransactionDraft, TransactionKind};
    use chrono::NaiveDate;

    #[test]
    fn largest_category_gets_full_bar() {
        let txns = vec![
            TransactionDraft::new(
                "Rent",
                300.0,
                Category::Rent,
                TransactionKind::Expense,
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            )
            .validate()
            .unwrap(),
            TransactionDraft::new(
                "Lunch",
                100.0,
                Category::Food,
                TransactionKind::Expense,
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            )
            .validate()
            .unwrap(),
        ];
        let totals = SummaryService::expense_breakdown(&txns);
        let rendered = render_breakdown(&totals, "RWF");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Food"));
        assert!(lines[0].contains("100 RWF (25.0%)"));
        assert!(lines[1].contains("300 RWF (75.0%)"));
        let fill_count = |line: &str| line.chars().filter(|c| *c == '#' || *c == '█').count();
        assert_eq!(fill_count(lines[1]), BAR_WIDTH);
        assert_eq!(fill_count(lines[0]), BAR_WIDTH / 3);
    }
}
