use std::fmt;

use serde::{Deserialize, Serialize};
use tokenplan_core::constants::{
    HIGH_FDV_TO_MCAP_RATIO, HIGH_TEAM_ALLOCATION_PERCENT, HIGH_TGE_UNLOCK_PERCENT,
    LOW_LIQUIDITY_ALLOCATION_PERCENT,
};
use tokenplan_core::types::{CategoryKind, PlannerConfiguration, TokenAmount, UnlockSchedulePoint};

/// Heuristic warnings, in the order they are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannerWarning {
    HighTgeUnlock,
    HighFdvToMcapRatio,
    HighTeamAllocation,
    LowLiquidityAllocation,
}

impl fmt::Display for PlannerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PlannerWarning::HighTgeUnlock => "High TGE unlock may cause price instability",
            PlannerWarning::HighFdvToMcapRatio => {
                "High FDV/MCap ratio indicates significant future dilution"
            }
            PlannerWarning::HighTeamAllocation => "Team allocation appears high",
            PlannerWarning::LowLiquidityAllocation => {
                "Low liquidity allocation may cause price volatility"
            }
        };
        f.write_str(msg)
    }
}

/// Summary figures derived from the first schedule point and the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub tge_circulating: TokenAmount,
    pub tge_circulating_percent: f64,
    pub initial_market_cap: f64,
    pub fully_diluted_valuation: f64,
    /// `None` when the initial market cap is zero.
    pub fdv_to_mcap_ratio: Option<f64>,
    pub warnings: Vec<PlannerWarning>,
}

/// Derive TGE circulating supply, valuations and warnings.
///
/// A zero market cap makes the FDV/MCap ratio undefined. It is then treated
/// as infinite when FDV is positive (the dilution warning fires) and as
/// undefined when FDV is zero too (no warning).
pub fn compute_metrics(schedule: &[UnlockSchedulePoint], config: &PlannerConfiguration) -> Metrics {
    let price = config.initial_token_price_usd;
    let tge_circulating = schedule
        .first()
        .map(|p| p.cumulative_circulating)
        .unwrap_or(0.0);
    let tge_circulating_percent = tge_circulating / config.total_supply * 100.0;
    let initial_market_cap = tge_circulating * price;
    let fully_diluted_valuation = config.total_supply * price;

    let fdv_to_mcap_ratio = if initial_market_cap == 0.0 {
        None
    } else {
        Some(fully_diluted_valuation / initial_market_cap)
    };
    let high_ratio = match fdv_to_mcap_ratio {
        Some(ratio) => ratio > HIGH_FDV_TO_MCAP_RATIO,
        None => fully_diluted_valuation > 0.0,
    };

    let mut warnings = Vec::new();
    if tge_circulating_percent > HIGH_TGE_UNLOCK_PERCENT {
        warnings.push(PlannerWarning::HighTgeUnlock);
    }
    if high_ratio {
        warnings.push(PlannerWarning::HighFdvToMcapRatio);
    }
    if config.percentage_of_kind(CategoryKind::Team) > HIGH_TEAM_ALLOCATION_PERCENT {
        warnings.push(PlannerWarning::HighTeamAllocation);
    }
    if config.percentage_of_kind(CategoryKind::Liquidity) < LOW_LIQUIDITY_ALLOCATION_PERCENT {
        warnings.push(PlannerWarning::LowLiquidityAllocation);
    }

    Metrics {
        tge_circulating,
        tge_circulating_percent,
        initial_market_cap,
        fully_diluted_valuation,
        fdv_to_mcap_ratio,
        warnings,
    }
}
