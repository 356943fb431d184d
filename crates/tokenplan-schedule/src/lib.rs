//! tokenplan-schedule
//!
//! The stateless calculator: unlock schedule, summary metrics and the data
//! series behind the allocation pie and circulating-supply line charts.
//! Every function here is pure; callers recompute from scratch on each edit.

pub mod chart;
pub mod metrics;
pub mod schedule;

pub use chart::{
    allocation_slices, circulating_series, humanize_label, month_date, AllocationSlice,
    CirculatingPoint,
};
pub use metrics::{compute_metrics, Metrics, PlannerWarning};
pub use schedule::{compute_unlock_schedule, CategoryRelease};
