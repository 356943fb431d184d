//! tokenplan-presets
//!
//! Starting configurations for a planner session and their JSON form on disk.
//!
//! A configuration read from disk is checked structurally (unique category
//! names, positive supply and price). An aggregate above 100% is accepted and
//! logged: the allocation guard only applies to edits, never to existing state.

pub mod reference;

pub use reference::{reference_configuration, REFERENCE_TOKEN_PRICE_USD, REFERENCE_TOTAL_SUPPLY};

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokenplan_core::constants::MAX_ALLOCATION_BPS;
use tokenplan_core::error::PlannerError;
use tokenplan_core::types::{PlannerConfiguration, TokenAmount};
use tracing::{info, warn};

/// How much of the total supply the categories account for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub total_percentage: f64,
    pub total_bps: i64,
    pub allocated_tokens: TokenAmount,
    /// Negative when over-allocated.
    pub unallocated_tokens: TokenAmount,
    pub over_allocated: bool,
}

pub fn verify_allocation(config: &PlannerConfiguration) -> AllocationSummary {
    let allocated_tokens: TokenAmount = config
        .categories
        .iter()
        .map(|c| c.token_amount(config.total_supply))
        .sum();
    let total_bps = config.total_allocation_bps();
    AllocationSummary {
        total_percentage: config.total_percentage(),
        total_bps,
        allocated_tokens,
        unallocated_tokens: config.total_supply - allocated_tokens,
        over_allocated: total_bps > MAX_ALLOCATION_BPS,
    }
}

/// Read and validate a configuration from a JSON file.
pub fn load_configuration(path: &Path) -> Result<PlannerConfiguration, PlannerError> {
    let json = std::fs::read_to_string(path)?;
    let config = parse_configuration(&json)?;
    info!(
        path = %path.display(),
        categories = config.categories.len(),
        "configuration loaded"
    );
    Ok(config)
}

pub fn parse_configuration(json: &str) -> Result<PlannerConfiguration, PlannerError> {
    let config: PlannerConfiguration = serde_json::from_str(json)?;
    config.validate()?;
    let summary = verify_allocation(&config);
    if summary.over_allocated {
        warn!(
            total_percentage = summary.total_percentage,
            "configuration allocates more than 100% of supply"
        );
    }
    Ok(config)
}

/// Write `config` as pretty-printed JSON, creating parent directories.
pub fn save_configuration(path: &Path, config: &PlannerConfiguration) -> Result<(), PlannerError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), "configuration saved");
    Ok(())
}
