//! Category model
//!
//! A category classifies entries as income or expense and carries the
//! display attributes (color, symbolic icon, custom image) front ends use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;
use super::SoftDelete;

/// Whether entries in a category count as income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    /// Get all kinds in display order
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense]
    }

    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown category type '{}': expected income or expense",
                other
            )),
        }
    }
}

/// A spending or income category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Owner id carried through from synced data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Display label
    pub name: String,

    /// Income or expense, fixed at creation
    #[serde(rename = "type")]
    pub kind: CategoryKind,

    /// Display color (e.g. "#FF6B6B")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Symbolic icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Reference to a stored custom image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_image: Option<String>,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,

    /// When the category was moved to the trash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            user_id: None,
            name: name.into(),
            kind,
            color: None,
            icon: None,
            icon_image: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Check if this category counts as income
    pub fn is_income(&self) -> bool {
        self.kind == CategoryKind::Income
    }

    /// Generated fallback glyph when neither image nor icon is set
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    /// Lookup view of the display attributes
    pub fn icon_info(&self) -> CategoryIcon {
        CategoryIcon {
            icon: self.icon.clone(),
            icon_image: self.icon_image.clone(),
            color: self.color.clone(),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl SoftDelete for Category {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Display attributes returned by icon lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryIcon {
    pub icon: Option<String>,
    pub icon_image: Option<String>,
    pub color: Option<String>,
}

impl CategoryIcon {
    /// Which visual should be shown, in fallback order
    pub fn glyph<'a>(&'a self, category: &Category) -> IconGlyph<'a> {
        if let Some(image) = self.icon_image.as_deref() {
            IconGlyph::Image(image)
        } else if let Some(icon) = self.icon.as_deref() {
            IconGlyph::Symbol(icon)
        } else {
            IconGlyph::Initial(category.initial())
        }
    }
}

/// Resolved visual for a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconGlyph<'a> {
    Image(&'a str),
    Symbol(&'a str),
    Initial(String),
}

/// Input for creating a category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub kind: CategoryKind,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub icon_image: Option<String>,
}

impl NewCategory {
    /// Create input with only the required fields
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            color: None,
            icon: None,
            icon_image: None,
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn icon_image(mut self, reference: impl Into<String>) -> Self {
        self.icon_image = Some(reference.into());
        self
    }

    /// Build the category record, assigning id and timestamps
    pub fn into_category(self) -> Category {
        let mut category = Category::new(self.name, self.kind);
        category.color = self.color;
        category.icon = self.icon;
        category.icon_image = self.icon_image;
        category
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
