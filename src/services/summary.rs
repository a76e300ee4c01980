//! Summary service
//!
//! Income and expense totals for a day or a range of days. An entry counts
//! toward a total only while its category is active; entries of trashed or
//! missing categories are left out.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{Amount, Category, CategoryId, CategoryKind, Entry};
use crate::storage::Storage;

/// Total of one category over the period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Amount,
    pub entry_count: usize,
}

/// Totals over a period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: Amount,
    pub expense: Amount,
    /// One row per active category, income first, then by name
    pub by_category: Vec<CategoryTotal>,
}

impl Summary {
    /// Income minus expense; negative when more went out than came in
    pub fn balance(&self) -> Amount {
        self.income - self.expense
    }

    pub fn income_categories(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.by_category.iter().filter(|t| t.category.is_income())
    }

    pub fn expense_categories(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.by_category.iter().filter(|t| !t.category.is_income())
    }
}

/// Service for totals
pub struct SummaryService<'a> {
    storage: &'a Storage,
}

impl<'a> SummaryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Totals for a single day
    pub fn day(&self, day: NaiveDate) -> SpendbookResult<Summary> {
        let entries = self.storage.entries.get_entries_by_date(day)?;
        self.summarize(day, day, &entries)
    }

    /// Totals for the days between `start` and `end`, inclusive
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> SpendbookResult<Summary> {
        if start > end {
            return Err(SpendbookError::Validation(format!(
                "Range start {} is after end {}",
                start, end
            )));
        }
        let entries = self.storage.entries.get_entries_in_range(start, end)?;
        self.summarize(start, end, &entries)
    }

    fn summarize(&self, start: NaiveDate, end: NaiveDate, entries: &[Entry]) -> SpendbookResult<Summary> {
        let categories = self.storage.categories.active()?;

        let mut totals: HashMap<&CategoryId, (Amount, usize)> = HashMap::new();
        for entry in entries {
            if let Some(category_id) = &entry.category_id {
                let slot = totals.entry(category_id).or_insert((Amount::zero(), 0));
                slot.0 += entry.amount;
                slot.1 += 1;
            }
        }

        let mut income = Amount::zero();
        let mut expense = Amount::zero();
        let mut by_category = Vec::with_capacity(categories.len());

        for category in &categories {
            let (total, entry_count) = totals.get(&category.id).copied().unwrap_or_default();
            match category.kind {
                CategoryKind::Income => income += total,
                CategoryKind::Expense => expense += total,
            }
            by_category.push(CategoryTotal {
                category: category.clone(),
                total,
                entry_count,
            });
        }

        by_category.sort_by(|a, b| {
            b.category
                .is_income()
                .cmp(&a.category.is_income())
                .then_with(|| a.category.name.to_lowercase().cmp(&b.category.name.to_lowercase()))
        });

        Ok(Summary {
            start,
            end,
            income,
            expense,
            by_category,
        })
    }
}
