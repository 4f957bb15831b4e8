//! # Suggestion Cache
//!
//! 生產建議快取與髒物料追蹤

pub mod dirty_tracking;
pub mod suggestion_cache;

pub use dirty_tracking::DirtyTracker;
pub use suggestion_cache::SuggestionCache;
