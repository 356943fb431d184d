use serde::Serialize;
use tokenplan_core::types::{AllocationCategory, PlannerConfiguration, UnlockSchedulePoint};
use tokenplan_presets::{verify_allocation, AllocationSummary};
use tokenplan_schedule::{
    allocation_slices, circulating_series, compute_metrics, compute_unlock_schedule,
    AllocationSlice, CirculatingPoint, Metrics,
};
use tracing::debug;

use crate::session::{ChartOptions, EditField};

/// Everything a front end needs to draw the planner, derived in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct PlannerView {
    pub schedule: Vec<UnlockSchedulePoint>,
    pub metrics: Metrics,
    pub allocation: AllocationSummary,
    pub slices: Vec<AllocationSlice>,
    pub series: Vec<CirculatingPoint>,
    pub chart_options: ChartOptions,
    pub expanded_category: Option<AllocationCategory>,
    /// Inputs shown for the expanded category. The TGE field only appears
    /// for TGE-eligible categories.
    pub expanded_fields: Vec<EditField>,
}

impl PlannerView {
    pub fn build(
        config: &PlannerConfiguration,
        expanded_category: Option<&str>,
        chart_options: ChartOptions,
    ) -> Self {
        let schedule = compute_unlock_schedule(config);
        let metrics = compute_metrics(&schedule, config);
        let series = circulating_series(&schedule, config.tge_date);

        let expanded = expanded_category.and_then(|name| config.category(name));
        let expanded_fields = match expanded {
            Some(c) if c.tge_eligible => vec![
                EditField::TgeUnlockPercent,
                EditField::CliffMonths,
                EditField::VestingDurationMonths,
            ],
            Some(_) => vec![EditField::CliffMonths, EditField::VestingDurationMonths],
            None => Vec::new(),
        };

        debug!(warnings = metrics.warnings.len(), "planner view rebuilt");

        Self {
            schedule,
            metrics,
            allocation: verify_allocation(config),
            slices: allocation_slices(config),
            series,
            chart_options,
            expanded_category: expanded.cloned(),
            expanded_fields,
        }
    }
}
