//! Style Watcher & Incremental Cache Updates
//!
//! Real-time monitoring of style sources, feeding the class cache.
//!
//! # Architecture
//!
//! The watcher uses a 2-phase processing model:
//! 1. **File System Events** → Notify-rs detects changes and queues them
//! 2. **Background Processing** → Async task drains the queue every second
//!
//! The separation keeps event intake responsive: a slow SCSS compile runs on
//! the background task, never in the notify callback.

mod events;
pub mod filtering; // Public for tests
pub mod handlers; // Public for tests
pub mod types;

use anyhow::{Context, Result};
use notify::Watcher;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::SystemTime;
use tokio::sync::{Mutex as TokioMutex, mpsc};
use tracing::{debug, error, info, warn};

use crate::cache::ClassCache;
use crate::extractors::ClassExtractor;

pub use types::{ScanStats, StyleChangeKind, StyleFileEvent};

/// Watches a workspace for style-file changes and applies them to the cache
pub struct StyleWatcher {
    watcher: Option<notify::RecommendedWatcher>,
    cache: Arc<StdMutex<ClassCache>>,
    extractor: Arc<ClassExtractor>,

    // Processing queue
    pub(crate) event_queue: Arc<TokioMutex<VecDeque<StyleFileEvent>>>,

    // Event deduplication: notify fires Create + Modify pairs for one save,
    // so recently processed paths are skipped for a short window.
    last_processed: Arc<TokioMutex<HashMap<PathBuf, SystemTime>>>,

    // File filters
    style_extensions: HashSet<String>,
    ignore_patterns: Vec<glob::Pattern>,

    workspace_root: PathBuf,
}

impl StyleWatcher {
    /// Create a new style watcher for the given workspace
    pub fn new(workspace_root: PathBuf, cache: Arc<StdMutex<ClassCache>>) -> Result<Self> {
        let style_extensions = filtering::build_style_extensions();
        let ignore_patterns = filtering::build_ignore_patterns()?;

        Ok(Self {
            watcher: None,
            cache,
            extractor: Arc::new(ClassExtractor::new()),
            event_queue: Arc::new(TokioMutex::new(VecDeque::new())),
            last_processed: Arc::new(TokioMutex::new(HashMap::new())),
            style_extensions,
            ignore_patterns,
            workspace_root,
        })
    }

    /// Start watching the workspace for style-file changes
    pub async fn start_watching(&mut self) -> Result<()> {
        info!(
            "Starting style watcher for workspace: {}",
            self.workspace_root.display()
        );

        let (tx, mut rx) = mpsc::unbounded_channel::<notify::Result<notify::Event>>();

        // Create the watcher
        let mut watcher = notify::recommended_watcher(move |res| {
            if let Err(e) = tx.send(res) {
                error!("Failed to send file event: {}", e);
            }
        })?;

        // Start watching the workspace
        watcher
            .watch(&self.workspace_root, notify::RecursiveMode::Recursive)
            .context("Failed to start watching workspace")?;

        self.watcher = Some(watcher);

        // Event detector task: convert notify events into queued style changes
        let style_extensions = self.style_extensions.clone();
        let ignore_patterns = self.ignore_patterns.clone();
        let event_queue = self.event_queue.clone();

        tokio::spawn(async move {
            debug!("File system event detector started");
            while let Some(event_result) = rx.recv().await {
                match event_result {
                    Ok(event) => {
                        if let Err(e) = events::process_file_system_event(
                            &style_extensions,
                            &ignore_patterns,
                            event_queue.clone(),
                            event,
                        )
                        .await
                        {
                            error!("Error processing file system event: {}", e);
                        }
                    }
                    Err(e) => {
                        warn!("File watcher error: {}", e);
                    }
                }
            }
        });

        // Background task draining the queue
        let cache = self.cache.clone();
        let extractor = self.extractor.clone();
        let queue_for_processing = self.event_queue.clone();
        let last_processed = self.last_processed.clone();

        tokio::spawn(async move {
            use tokio::time::{Duration, interval};
            let mut tick = interval(Duration::from_secs(1));

            debug!("Background queue processor started");
            loop {
                tick.tick().await;

                while let Some(event) = {
                    let mut queue = queue_for_processing.lock().await;
                    queue.pop_front()
                } {
                    // Skip paths processed within the last second: notify
                    // fires multiple events for a single save.
                    let should_skip = {
                        let mut last_proc = last_processed.lock().await;
                        let now = SystemTime::now();

                        let recent = last_proc
                            .get(&event.path)
                            .and_then(|t| now.duration_since(*t).ok())
                            .is_some_and(|elapsed| elapsed < Duration::from_secs(1));
                        if recent {
                            debug!("Skipping duplicate event for {:?}", event.path);
                        } else {
                            last_proc.insert(event.path.clone(), now);
                        }
                        recent
                    };

                    if should_skip {
                        continue;
                    }

                    debug!("Background task processing: {:?}", event.path);
                    if let Err(e) = match event.change_type {
                        StyleChangeKind::Created | StyleChangeKind::Modified => {
                            handlers::handle_style_created_or_modified(
                                &event.path,
                                &cache,
                                &extractor,
                            )
                        }
                        StyleChangeKind::Deleted => {
                            handlers::handle_style_deleted(&event.path, &cache)
                        }
                    } {
                        error!("Failed to handle style change: {}", e);
                    }
                }
            }
        });

        info!("Style watcher started with background queue processing");
        Ok(())
    }

    /// Drain any pending style changes from the queue immediately
    pub async fn process_pending_changes(&self) -> Result<()> {
        while let Some(event) = {
            let mut queue = self.event_queue.lock().await;
            queue.pop_front()
        } {
            if let Err(e) = match event.change_type {
                StyleChangeKind::Created | StyleChangeKind::Modified => {
                    handlers::handle_style_created_or_modified(
                        &event.path,
                        &self.cache,
                        &self.extractor,
                    )
                }
                StyleChangeKind::Deleted => handlers::handle_style_deleted(&event.path, &self.cache),
            } {
                error!("Failed to handle style change: {}", e);
            }
        }
        Ok(())
    }

    /// Stop the style watcher
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(watcher) = self.watcher.take() {
            drop(watcher);
            info!("Style watcher stopped");
        }
        Ok(())
    }
}
