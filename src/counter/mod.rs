//! Submission counting.
//!
//! Every successfully bound message submission bumps a process-wide counter whose new value is
//! echoed back to the client. The counter lives for the lifetime of the process and is never
//! persisted.
//!
//! The counter is injected into the [HTTP API][crate::api] state rather than held in a global so
//! that each router (and each test) owns an independent count.

use std::sync::Arc;

pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryCounter;

/// `DynCounter` is a type alias for a [`MessageCounter`] shared by every request handler.
#[allow(clippy::module_name_repetitions)]
pub type DynCounter = Arc<dyn MessageCounter + Send + Sync>;

/// A trait describing a monotonically increasing count of accepted message submissions.
///
/// Implementations must serialize concurrent increments: N calls to [`increment`] from any
/// number of threads return each of the values `1..=N` exactly once.
///
/// [`increment`]: MessageCounter::increment
pub trait MessageCounter {
    /// Count one submission, returning the post-increment value.
    fn increment(&self) -> u64;

    /// The number of submissions counted so far.
    fn current(&self) -> u64;
}
