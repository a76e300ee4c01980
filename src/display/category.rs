//! Category display formatting
//!
//! Formats categories for terminal output as a table and as a detail view.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, IconGlyph, SoftDelete};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Text form of the visual a category shows, in fallback order
pub fn icon_label(category: &Category) -> String {
    let info = category.icon_info();
    match info.glyph(category) {
        IconGlyph::Image(reference) => format!("image:{}", reference),
        IconGlyph::Symbol(icon) => icon.to_string(),
        IconGlyph::Initial(initial) => format!("[{}]", initial),
    }
}

fn status(category: &Category) -> String {
    match category.deleted_at {
        Some(at) => format!("trashed {}", at.format("%Y-%m-%d")),
        None => "active".to_string(),
    }
}

/// Format categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nCreate one with 'spendbook category add <name> --type expense'.\n"
            .to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.short().to_string(),
        name: c.name.clone(),
        kind: c.kind.to_string(),
        icon: icon_label(c),
        color: c.color.clone().unwrap_or_else(|| "-".to_string()),
        status: status(c),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

/// Format category details
pub fn format_category_details(category: &Category, entry_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:      {}\n", category.id));
    output.push_str(&format!("  Type:    {}\n", category.kind));
    output.push_str(&format!("  Icon:    {}\n", icon_label(category)));
    if let Some(color) = &category.color {
        output.push_str(&format!("  Color:   {}\n", color));
    }
    output.push_str(&format!("  Entries: {}\n", entry_count));
    output.push_str(&format!(
        "  Created: {}\n",
        category.created_at.format("%Y-%m-%d %H:%M")
    ));
    if category.is_trashed() {
        output.push_str(&format!("  Status:  {}\n", status(category)));
    }

    output
}
