//! Core abstractions for focus-space.
//!
//! This module provides the clock seam, time formatting helpers, id
//! allocation and program lookup shared across features.

mod datetime;
mod ids;
mod traits;
mod which;

pub use datetime::{format_duration, format_mmss, format_note_timestamp};
pub use ids::next_id;
pub use traits::{Clock, ManualClock, SystemClock};
pub use which::find_program;
