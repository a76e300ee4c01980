//! Entry display formatting
//!
//! Entries are shown with their category label and a signed amount: `+` for
//! income, `-` for expense, nothing when the category is gone.

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, CategoryId, Entry};
use crate::services::category_label;

/// Category lookup used while rendering entries
pub struct CategoryIndex<'a> {
    by_id: HashMap<&'a CategoryId, &'a Category>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self {
            by_id: categories.iter().map(|c| (&c.id, c)).collect(),
        }
    }

    pub fn get(&self, id: Option<&CategoryId>) -> Option<&'a Category> {
        id.and_then(|id| self.by_id.get(id).copied())
    }
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// Amount with currency symbol, signed by the category type
pub fn signed_amount(entry: &Entry, category: Option<&Category>, symbol: &str) -> String {
    let amount = entry.amount.format_with_symbol(symbol);
    match category {
        Some(c) if c.is_income() => format!("+{}", amount),
        Some(_) => format!("-{}", amount),
        None => amount,
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format entries as a table
pub fn format_entry_list(entries: &[Entry], categories: &CategoryIndex<'_>, symbol: &str) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let rows = entries.iter().map(|e| {
        let category = categories.get(e.category_id.as_ref());
        EntryRow {
            id: e.id.short().to_string(),
            date: e.date.to_string(),
            category: category_label(category),
            amount: signed_amount(e, category, symbol),
            note: truncate(e.note.as_deref().unwrap_or(""), 30),
        }
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

/// Format entry details for display
pub fn format_entry_details(entry: &Entry, category: Option<&Category>, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry:    {}\n", entry.id));
    output.push_str(&format!("Date:     {}\n", entry.date));
    output.push_str(&format!("Amount:   {}\n", signed_amount(entry, category, symbol)));
    output.push_str(&format!("Category: {}\n", category_label(category)));

    if let Some(note) = &entry.note {
        output.push_str(&format!("Note:     {}\n", note));
    }

    output.push_str(&format!(
        "Created:  {}\n",
        entry.created_at.format("%Y-%m-%d %H:%M")
    ));
    if entry.updated_at != entry.created_at {
        output.push_str(&format!(
            "Updated:  {}\n",
            entry.updated_at.format("%Y-%m-%d %H:%M")
        ));
    }
    if let Some(deleted_at) = entry.deleted_at {
        output.push_str(&format!(
            "Trashed:  {}\n",
            deleted_at.format("%Y-%m-%d %H:%M")
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, CategoryKind, NewEntry};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_signed_amounts() {
        let salary = Category::new("Salary", CategoryKind::Income);
        let food = Category::new("Food", CategoryKind::Expense);
        let entry = NewEntry::new(salary.id.clone(), Amount::from_units(500), day()).into_entry();

        assert_eq!(signed_amount(&entry, Some(&salary), "₹"), "+₹500.00");
        assert_eq!(signed_amount(&entry, Some(&food), "$"), "-$500.00");
        assert_eq!(signed_amount(&entry, None, "$"), "$500.00");
    }

    #[test]
    fn test_list_labels_categories() {
        let mut food = Category::new("Food", CategoryKind::Expense);
        food.deleted_at = Some(chrono::Utc::now());
        let categories = vec![food.clone()];
        let index = CategoryIndex::new(&categories);

        let lunch = NewEntry::new(food.id.clone(), Amount::from_units(12), day())
            .note("lunch")
            .into_entry();
        let orphan = NewEntry::new(crate::models::CategoryId::new(), Amount::from_units(3), day())
            .into_entry();

        let output = format_entry_list(&[lunch, orphan], &index, "₹");
        assert!(output.contains("Food (Deleted)"));
        assert!(output.contains("Category N/A"));
        assert!(output.contains("2025-06-01"));
    }

    #[test]
    fn test_empty_list() {
        let index = CategoryIndex::new(&[]);
        assert_eq!(format_entry_list(&[], &index, "₹"), "No entries found.\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long note indeed", 10), "a very ...");
    }
}
