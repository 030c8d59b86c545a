//! Interval scheduling: how many vehicles can use one space back to back.

mod interval;
mod optimizer;

pub use interval::{intervals_from, Interval};
pub use optimizer::{max_non_overlapping, max_non_overlapping_fast, select_non_overlapping};
