//! Incremental sync: decide which of this run's items are new, and what
//! to persist for the next run.

pub mod seen;
pub mod snapshot;

pub use seen::SeenSet;
pub use snapshot::{CommentSnapshot, CommentState};
