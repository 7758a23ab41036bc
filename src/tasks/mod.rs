//! Background Tasks Module
//!
//! Periodic maintenance for the data layer. Both tasks only ever read or
//! remove data, never add, so they cannot race foreground requests into
//! an inconsistent state.
//!
//! # Tasks
//! - Expiry sweep: removes expired cache entries at configured intervals
//! - Stats snapshot: logs cache occupancy and hit rates periodically

mod cleanup;
mod stats;

pub use cleanup::spawn_cleanup_task;
pub use stats::spawn_stats_task;
