//! tokenplan-session
//!
//! Interactive planner state: the live configuration, the expanded category
//! and chart toggles. Edits go through the session; `view()` recomputes the
//! schedule, metrics and chart data from scratch every time.

pub mod session;
pub mod view;

pub use session::{ChartOptions, EditField, EditStatus, PlannerSession};
pub use view::PlannerView;
