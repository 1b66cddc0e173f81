// Completion engine
//
// The single owned object tying the pieces together: it runs the initial
// workspace rescan, keeps the class cache behind a shared handle for the
// watcher and the host, and answers the two editor-facing questions:
// "what are the completions here?" and "should suggestions re-trigger
// after this text change?".
//
// Host adapters (completion provider registration, text-document plumbing,
// command execution) live outside this crate; they call into this surface.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::cache::{CacheStats, ClassCache, CompletionCandidate};
use crate::context;
use crate::extractors::ClassExtractor;
use crate::watcher::{ScanStats, StyleWatcher, filtering};

pub struct CompletionEngine {
    workspace_root: PathBuf,
    cache: Arc<Mutex<ClassCache>>,
    extractor: ClassExtractor,
    watcher: Option<StyleWatcher>,
}

impl CompletionEngine {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            cache: Arc::new(Mutex::new(ClassCache::new())),
            extractor: ClassExtractor::new(),
            watcher: None,
        }
    }

    /// Initial rescan plus watcher startup. The host calls this once on
    /// activation.
    pub async fn activate(&mut self) -> Result<ScanStats> {
        let stats = self.rescan();

        let mut style_watcher =
            StyleWatcher::new(self.workspace_root.clone(), self.cache.clone())?;
        style_watcher.start_watching().await?;
        self.watcher = Some(style_watcher);

        Ok(stats)
    }

    /// Stop watching and drop all in-memory state. Nothing persists.
    pub async fn deactivate(&mut self) -> Result<()> {
        if let Some(mut style_watcher) = self.watcher.take() {
            style_watcher.stop().await?;
        }
        self.lock_cache().clear();
        info!("Completion engine deactivated");
        Ok(())
    }

    /// Full-workspace rescan: one guarded update per discovered style file.
    ///
    /// A failing file is logged and skipped; its previous cached state (if
    /// any) stays untouched and the batch continues. Files are processed in
    /// discovery order, but the cache converges identically under any order.
    pub fn rescan(&self) -> ScanStats {
        let started = Instant::now();
        let mut stats = ScanStats::default();

        for path in self.discover_style_files() {
            match self.extractor.extract_classes(&path) {
                Ok(classes) => {
                    self.lock_cache().update(&path, classes);
                    stats.files_processed += 1;
                }
                Err(e) => {
                    warn!("Skipping style file {}: {}", path.display(), e);
                    stats.files_failed += 1;
                }
            }
        }

        stats.processing_time_ms = started.elapsed().as_millis() as u64;
        let cache_stats = self.stats();
        info!(
            "Rescan complete: {} files ({} failed), {} classes in {} variant groups, {}ms",
            stats.files_processed,
            stats.files_failed,
            cache_stats.classes,
            cache_stats.variant_groups,
            stats.processing_time_ms
        );
        stats
    }

    /// Completion provider entry point.
    ///
    /// Returns the flattened contents of all variant groups when either
    /// classifier reports the offset is in a class-relevant context of a
    /// supported document; `None` means "no suggestions".
    pub fn provide_completions(
        &self,
        text: &str,
        offset: usize,
        language_id: &str,
    ) -> Option<Vec<CompletionCandidate>> {
        if !context::is_supported_language(language_id) {
            return None;
        }
        if !context::is_in_class_context(text, offset) {
            return None;
        }
        Some(self.lock_cache().candidates())
    }

    /// Text-change listener decision: re-run both classifiers at the
    /// change's start offset.
    pub fn should_retrigger(&self, text: &str, offset: usize, language_id: &str) -> bool {
        context::is_supported_language(language_id) && context::is_in_class_context(text, offset)
    }

    /// Shared cache handle for host integration and tests.
    pub fn cache(&self) -> Arc<Mutex<ClassCache>> {
        self.cache.clone()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock_cache().stats()
    }

    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }

    fn discover_style_files(&self) -> Vec<PathBuf> {
        let style_extensions = filtering::build_style_extensions();
        let ignore_patterns = match filtering::build_ignore_patterns() {
            Ok(patterns) => patterns,
            Err(e) => {
                warn!("Failed to build ignore patterns: {}", e);
                Vec::new()
            }
        };

        let files: Vec<PathBuf> = WalkDir::new(&self.workspace_root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.into_path())
            .filter(|path| {
                filtering::is_watchable_style_file(path, &style_extensions, &ignore_patterns)
            })
            .collect();

        debug!(
            "Discovered {} style files under {}",
            files.len(),
            self.workspace_root.display()
        );
        files
    }

    fn lock_cache(&self) -> MutexGuard<'_, ClassCache> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Class cache mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}
