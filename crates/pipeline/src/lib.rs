//! Channel screening pipeline: cursor-paginated history extraction with
//! memoized actor resolution, followed by fixed-window batch classification
//! with threshold filtering.
//!
//! One invocation runs a single logical flow: pages are fetched strictly
//! in sequence (each depends on the previous cursor) and classification
//! windows are submitted strictly in order, so the final aggregate is
//! deterministic. Any remote failure aborts the whole invocation; no
//! partial result is ever returned.

pub mod batch;
pub mod history;
pub mod screen;
pub mod sink;

pub use batch::BatchClassifier;
pub use history::HistoryReader;
pub use screen::ScreeningPipeline;
