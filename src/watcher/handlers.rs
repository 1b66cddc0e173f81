//! Style change handlers for incremental cache updates
//!
//! Create/Modify runs the extraction pipeline and applies the result to the
//! cache; Delete releases the file's contribution. A failed extraction is
//! logged and skipped so the previous cached state for that file survives:
//! one broken stylesheet must never abort a batch or corrupt the index.

use crate::cache::ClassCache;
use crate::extractors::ClassExtractor;
use anyhow::Result;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Handle style-file creation or modification
pub fn handle_style_created_or_modified(
    path: &Path,
    cache: &Arc<Mutex<ClassCache>>,
    extractor: &ClassExtractor,
) -> Result<()> {
    let classes = match extractor.extract_classes(path) {
        Ok(classes) => classes,
        Err(e) => {
            warn!(
                "Class extraction failed for {}, keeping previous state: {}",
                path.display(),
                e
            );
            return Ok(());
        }
    };

    info!(
        "Extracted {} class names from {}",
        classes.len(),
        path.display()
    );

    let mut cache_lock = match cache.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("Class cache mutex poisoned during update, recovering");
            poisoned.into_inner()
        }
    };
    cache_lock.update(path, classes);

    Ok(())
}

/// Handle style-file deletion
pub fn handle_style_deleted(path: &Path, cache: &Arc<Mutex<ClassCache>>) -> Result<()> {
    info!("Removing deleted style file from cache: {}", path.display());

    let mut cache_lock = match cache.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("Class cache mutex poisoned during removal, recovering");
            poisoned.into_inner()
        }
    };
    cache_lock.remove(path);

    Ok(())
}
