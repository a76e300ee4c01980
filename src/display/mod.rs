//! Display formatting for terminal output
//!
//! Lists render as tables; single records render as aligned detail blocks.

pub mod category;
pub mod entry;
pub mod summary;

pub use category::{format_category_details, format_category_list, icon_label};
pub use entry::{format_entry_details, format_entry_list, signed_amount, CategoryIndex};
pub use summary::{format_summary, format_trash};
