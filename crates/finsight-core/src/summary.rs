//! Period spending summary
//!
//! Totals by direction plus the biggest debit category and the top five,
//! descending. Ties break by category name so the output is deterministic.

use crate::aggregate;
use crate::models::{CategoryTotal, Direction, Summary, Transaction};

/// How many categories the summary surfaces.
pub const TOP_CATEGORY_COUNT: usize = 5;

/// Build the spending summary for a transaction list.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let (total_debit, total_credit) = aggregate::sum_by_direction(transactions);

    let mut totals: Vec<CategoryTotal> =
        aggregate::group_by_category(transactions, Direction::Debit)
            .into_iter()
            .map(|(category, amounts)| CategoryTotal {
                category,
                total: amounts.iter().sum(),
            })
            .collect();

    totals.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });

    let biggest_category = totals.first().map(|t| t.category.clone());
    totals.truncate(TOP_CATEGORY_COUNT);

    Summary {
        total_debit,
        total_credit,
        biggest_category,
        top_categories: totals,
    }
}
