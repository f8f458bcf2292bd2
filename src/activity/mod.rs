//! Marketplace activity log
//!
//! Every mutation a dashboard command or the booking flow performs is
//! appended as one JSON line to `activity.log`. The admin dashboard reads
//! the tail of this file for its activity feed.
//!
//! - `ActivityEntry`: one recorded event with timestamp, kind and subject.
//! - `ActivityLogger`: append-only JSONL writer/reader.

mod entry;
mod logger;

pub use entry::{ActivityEntry, ActivityKind};
pub use logger::ActivityLogger;
