//! Summary and trash display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::services::{Summary, TrashContents};

use super::entry::{format_entry_list, CategoryIndex};

#[derive(Tabled)]
struct TotalRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Entries")]
    entries: usize,
    #[tabled(rename = "Total")]
    total: String,
}

/// Format income, expense and balance with per-category totals
pub fn format_summary(summary: &Summary, symbol: &str) -> String {
    let mut output = String::new();

    if summary.start == summary.end {
        output.push_str(&format!("Summary for {}\n", summary.start));
    } else {
        output.push_str(&format!("Summary for {} to {}\n", summary.start, summary.end));
    }
    output.push_str(&"=".repeat(30));
    output.push('\n');
    output.push_str(&format!("Income:  {}\n", summary.income.format_with_symbol(symbol)));
    output.push_str(&format!("Expense: {}\n", summary.expense.format_with_symbol(symbol)));
    output.push_str(&format!("Balance: {}\n", summary.balance().format_with_symbol(symbol)));

    let rows: Vec<TotalRow> = summary
        .by_category
        .iter()
        .filter(|t| t.entry_count > 0)
        .map(|t| TotalRow {
            category: t.category.name.clone(),
            kind: t.category.kind.to_string(),
            entries: t.entry_count,
            total: t.total.format_with_symbol(symbol),
        })
        .collect();

    if !rows.is_empty() {
        output.push('\n');
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');
    }

    output
}

/// Format trashed categories and entries
pub fn format_trash(contents: &TrashContents, index: &CategoryIndex<'_>, retention_days: u32, symbol: &str) -> String {
    if contents.is_empty() {
        return "Trash is empty.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "Items are removed for good {} days after they were trashed.\n\n",
        retention_days
    ));

    if !contents.categories.is_empty() {
        output.push_str(&format!("Categories ({}):\n", contents.categories.len()));
        output.push_str(&super::category::format_category_list(&contents.categories));
        output.push('\n');
    }

    if !contents.entries.is_empty() {
        output.push_str(&format!("Entries ({}):\n", contents.entries.len()));
        output.push_str(&format_entry_list(&contents.entries, index, symbol));
    }

    output
}
