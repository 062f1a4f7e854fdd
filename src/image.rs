//! Image source capability.
//!
//! A capsule only stores an opaque reference to a photo; picking the photo and
//! owning the file belongs to the device. [`ImageSource`] is the seam for
//! that, and [`FileImageSource`] is the desktop stand-in that turns a path on
//! disk into a `file://` reference.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::CapabilityError;

pub trait ImageSource: Send + Sync {
    /// Resolve a user selection into the reference stored on the capsule.
    fn resolve(&self, selection: &str) -> Result<String, CapabilityError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageSource;

impl ImageSource for FileImageSource {
    fn resolve(&self, selection: &str) -> Result<String, CapabilityError> {
        let path = Path::new(selection.strip_prefix("file://").unwrap_or(selection));

        let absolute = path.canonicalize().map_err(|e| match e.kind() {
            ErrorKind::NotFound => CapabilityError::NotFound(path.display().to_string()),
            ErrorKind::PermissionDenied => {
                CapabilityError::PermissionDenied(path.display().to_string())
            }
            _ => CapabilityError::Io(e),
        })?;

        if !absolute.is_file() {
            return Err(CapabilityError::NotFound(format!(
                "{} is not a file",
                absolute.display()
            )));
        }

        // Opening proves we can actually read it, not just see it.
        std::fs::File::open(&absolute).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => {
                CapabilityError::PermissionDenied(absolute.display().to_string())
            }
            _ => CapabilityError::Io(e),
        })?;

        Ok(format!("file://{}", absolute.display()))
    }
}
