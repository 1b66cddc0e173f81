//! Type definitions for style-file events and scan statistics

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// A file system change to a style source
#[derive(Debug, Clone)]
pub struct StyleFileEvent {
    pub path: PathBuf,
    pub change_type: StyleChangeKind,
    pub timestamp: SystemTime,
}

/// Kinds of style-file changes we track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleChangeKind {
    Created,
    Modified,
    Deleted,
}

/// Outcome of a full-workspace rescan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    pub files_processed: u64,
    pub files_failed: u64,
    pub processing_time_ms: u64,
}
