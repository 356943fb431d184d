//! Monthly unlock schedule over a fixed 48-month horizon.
//!
//! Each category contributes two independent components:
//!
//!   tge_amount     = tokens × tge% / 100            (month index 0 only)
//!   monthly_unlock = (tokens − tge_amount) / duration
//!                    for cliff ≤ idx < cliff + duration
//!
//! With `cliff = 0` index 0 receives both. Nothing is forced out at the end
//! of the horizon: vesting that runs past month 48 leaves tokens locked.

use tokenplan_core::constants::SCHEDULE_HORIZON_MONTHS;
use tokenplan_core::types::{
    AllocationCategory, Months, PlannerConfiguration, TokenAmount, UnlockSchedulePoint,
};
use tracing::debug;

/// Per-category release parameters derived from the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRelease {
    pub token_amount: TokenAmount,
    pub tge_amount: TokenAmount,
    pub remaining_amount: TokenAmount,
    /// Zero when the vesting duration is not positive.
    pub monthly_unlock: TokenAmount,
    pub cliff_months: Months,
    pub vesting_duration_months: Months,
}

impl CategoryRelease {
    pub fn of(category: &AllocationCategory, total_supply: TokenAmount) -> Self {
        let token_amount = category.token_amount(total_supply);
        let tge_amount = token_amount * category.effective_tge_percent() / 100.0;
        let remaining_amount = token_amount - tge_amount;
        let monthly_unlock = if category.vesting_duration_months > 0 {
            remaining_amount / category.vesting_duration_months as f64
        } else {
            0.0
        };
        Self {
            token_amount,
            tge_amount,
            remaining_amount,
            monthly_unlock,
            cliff_months: category.cliff_months,
            vesting_duration_months: category.vesting_duration_months,
        }
    }

    /// True if month index `idx` (0 = TGE) falls inside the vesting window.
    pub fn vests_at(&self, idx: usize) -> bool {
        let idx = idx as i64;
        let start = self.cliff_months as i64;
        let end = start + self.vesting_duration_months as i64;
        start <= idx && idx < end
    }

    /// Tokens of this category released within the horizon.
    pub fn released_within_horizon(&self) -> TokenAmount {
        let vesting_months = (0..SCHEDULE_HORIZON_MONTHS)
            .filter(|&idx| self.vests_at(idx))
            .count();
        self.tge_amount + self.monthly_unlock * vesting_months as f64
    }

    /// Tokens of this category still locked after the last month.
    pub fn unvested_at_horizon(&self) -> TokenAmount {
        self.token_amount - self.released_within_horizon()
    }
}

/// Compute the 48-point cumulative unlock schedule for `config`.
///
/// No validation is performed: negative or oversized inputs yield a
/// correspondingly odd schedule, never a panic.
pub fn compute_unlock_schedule(config: &PlannerConfiguration) -> Vec<UnlockSchedulePoint> {
    let mut increments = vec![0.0_f64; SCHEDULE_HORIZON_MONTHS];

    for category in &config.categories {
        let release = CategoryRelease::of(category, config.total_supply);
        increments[0] += release.tge_amount;
        for (idx, increment) in increments.iter_mut().enumerate() {
            if release.vests_at(idx) {
                *increment += release.monthly_unlock;
            }
        }
    }

    let mut cumulative = 0.0;
    let schedule: Vec<UnlockSchedulePoint> = increments
        .into_iter()
        .enumerate()
        .map(|(idx, increment)| {
            cumulative += increment;
            UnlockSchedulePoint {
                month: idx as u32 + 1,
                circulating_increment: increment,
                cumulative_circulating: cumulative,
                percent_circulating: cumulative / config.total_supply * 100.0,
            }
        })
        .collect();

    debug!(
        categories = config.categories.len(),
        final_circulating = cumulative,
        "unlock schedule computed"
    );
    schedule
}
