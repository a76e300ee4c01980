//! Custom category image resources
//!
//! A category's `iconImage` points at content it owns exclusively. When the
//! category is removed for good the content is released. Release is best
//! effort: a failure is logged and the category is removed anyway.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::Category;

/// Storage for custom category images
pub trait ImageStore: Send + Sync {
    /// Release the content behind `reference`; releasing missing content is not an error
    fn release(&self, reference: &str) -> SpendbookResult<()>;
}

/// Images stored as plain files, referenced by path
#[derive(Debug, Clone, Default)]
pub struct FsImageStore;

impl ImageStore for FsImageStore {
    fn release(&self, reference: &str) -> SpendbookResult<()> {
        match std::fs::remove_file(Path::new(reference)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SpendbookError::Io(format!(
                "Failed to delete icon image {}: {}",
                reference, e
            ))),
        }
    }
}

/// Image store that owns nothing, for stores without file resources
#[derive(Debug, Clone, Default)]
pub struct NoopImageStore;

impl ImageStore for NoopImageStore {
    fn release(&self, _reference: &str) -> SpendbookResult<()> {
        Ok(())
    }
}

/// Release the image of each removed category, logging failures
pub fn release_images<'a, I>(images: &dyn ImageStore, removed: I)
where
    I: IntoIterator<Item = &'a Category>,
{
    for category in removed {
        if let Some(reference) = category.icon_image.as_deref() {
            match images.release(reference) {
                Ok(()) => tracing::debug!(category = %category.id, image = reference, "released icon image"),
                Err(err) => tracing::warn!(
                    category = %category.id,
                    image = reference,
                    error = %err,
                    "Failed to delete icon image"
                ),
            }
        }
    }
}
