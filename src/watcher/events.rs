//! File system event processing pipeline
//!
//! Converts `notify::Event` instances into `StyleFileEvent` entries queued
//! for background processing.

use crate::watcher::filtering;
use crate::watcher::types::{StyleChangeKind, StyleFileEvent};
use anyhow::Result;
use notify::{Event, EventKind};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex as TokioMutex;
use tracing::debug;

/// Process a file system event and queue any relevant style-file changes
pub async fn process_file_system_event(
    style_extensions: &HashSet<String>,
    ignore_patterns: &[glob::Pattern],
    event_queue: Arc<TokioMutex<VecDeque<StyleFileEvent>>>,
    event: Event,
) -> Result<()> {
    debug!("Processing file system event: {:?}", event);

    match event.kind {
        EventKind::Create(_) => {
            for path in event.paths {
                if filtering::is_watchable_style_file(&path, style_extensions, ignore_patterns) {
                    let change_event = StyleFileEvent {
                        path: path.clone(),
                        change_type: StyleChangeKind::Created,
                        timestamp: SystemTime::now(),
                    };
                    queue_style_change(event_queue.clone(), change_event).await;
                }
            }
        }
        EventKind::Modify(_) => {
            for path in event.paths {
                if filtering::is_watchable_style_file(&path, style_extensions, ignore_patterns) {
                    let change_event = StyleFileEvent {
                        path: path.clone(),
                        change_type: StyleChangeKind::Modified,
                        timestamp: SystemTime::now(),
                    };
                    queue_style_change(event_queue.clone(), change_event).await;
                }
            }
        }
        EventKind::Remove(_) => {
            for path in event.paths {
                // The path is already gone, so only the pure filters apply.
                if filtering::matches_style_filters(&path, style_extensions, ignore_patterns) {
                    let change_event = StyleFileEvent {
                        path: path.clone(),
                        change_type: StyleChangeKind::Deleted,
                        timestamp: SystemTime::now(),
                    };
                    queue_style_change(event_queue.clone(), change_event).await;
                }
            }
        }
        _ => {
            debug!("Ignoring event kind: {:?}", event.kind);
        }
    }

    Ok(())
}

/// Queue a style-file change event for processing
async fn queue_style_change(
    event_queue: Arc<TokioMutex<VecDeque<StyleFileEvent>>>,
    event: StyleFileEvent,
) {
    debug!("Queueing style change: {:?}", event);

    let mut queue = event_queue.lock().await;
    queue.push_back(event);
}
