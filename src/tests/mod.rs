// Stylie's Test Infrastructure
//
// Per-area test modules for the extraction pipeline, the incremental class
// cache, the context classifiers, and the engine surface. Small pure helpers
// (variant key derivation, watcher filtering) keep inline #[cfg(test)]
// modules next to their implementations.

// ============================================================================
// CORE CACHE TESTS - update/remove algorithms, reference counting
// ============================================================================
pub mod cache_tests;


// ============================================================================
// CONTEXT CLASSIFIER TESTS - markup attributes, utility calls
// ============================================================================
pub mod markup_context_tests;
