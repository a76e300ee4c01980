//! Service layer for Spendbook
//!
//! The service layer sits on top of the storage layer, resolving identifiers,
//! checking cross-store references, and sequencing operations that touch
//! both record stores.

pub mod category;
pub mod entry;
pub mod summary;
pub mod trash;

pub use category::{category_label, CategoryDeletion, CategoryService, DeleteMode, EntryCascade};
pub use entry::EntryService;
pub use summary::{CategoryTotal, Summary, SummaryService};
pub use trash::{PurgeSummary, TrashContents, TrashService};
