use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{BPS_PER_PERCENT, MAX_ALLOCATION_BPS};
use crate::error::PlannerError;

/// Token quantity. Fractional amounts are allowed; schedules divide evenly.
pub type TokenAmount = f64;

/// Whole months relative to the TGE. Signed so that out-of-range input
/// degrades the schedule instead of failing to parse.
pub type Months = i32;

// ── CategoryKind ─────────────────────────────────────────────────────────────

/// Role of an allocation bucket. Heuristic warnings select categories by
/// kind rather than by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    PublicSale,
    PrivateRounds,
    Team,
    Development,
    Ecosystem,
    Treasury,
    Liquidity,
    #[default]
    Other,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CategoryKind::PublicSale => "public sale",
            CategoryKind::PrivateRounds => "private rounds",
            CategoryKind::Team => "team",
            CategoryKind::Development => "development",
            CategoryKind::Ecosystem => "ecosystem",
            CategoryKind::Treasury => "treasury",
            CategoryKind::Liquidity => "liquidity",
            CategoryKind::Other => "other",
        };
        f.write_str(s)
    }
}

// ── AllocationCategory ───────────────────────────────────────────────────────

/// One funding/allocation bucket of the total supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationCategory {
    /// Unique within a configuration.
    pub name: String,
    #[serde(default)]
    pub kind: CategoryKind,
    /// Share of total supply, 0–100.
    pub percentage: f64,
    /// Whether a TGE unlock applies at all. When false `tge_unlock_percent`
    /// is kept for editing but ignored by the schedule.
    #[serde(default)]
    pub tge_eligible: bool,
    /// Share of this category released at TGE, 0–100.
    #[serde(default)]
    pub tge_unlock_percent: f64,
    #[serde(default)]
    pub cliff_months: Months,
    /// Months over which the non-TGE remainder unlocks linearly. Zero means
    /// nothing vests after TGE.
    #[serde(default)]
    pub vesting_duration_months: Months,
}

impl AllocationCategory {
    pub fn new(name: impl Into<String>, kind: CategoryKind, percentage: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            percentage,
            tge_eligible: false,
            tge_unlock_percent: 0.0,
            cliff_months: 0,
            vesting_duration_months: 0,
        }
    }

    /// Mark the category TGE-eligible with the given unlock share.
    pub fn with_tge(mut self, tge_unlock_percent: f64) -> Self {
        self.tge_eligible = true;
        self.tge_unlock_percent = tge_unlock_percent;
        self
    }

    pub fn with_vesting(mut self, cliff_months: Months, vesting_duration_months: Months) -> Self {
        self.cliff_months = cliff_months;
        self.vesting_duration_months = vesting_duration_months;
        self
    }

    /// Tokens assigned to this category out of `total_supply`.
    pub fn token_amount(&self, total_supply: TokenAmount) -> TokenAmount {
        total_supply * self.percentage / 100.0
    }

    /// Effective TGE share: zero for categories that are not TGE-eligible.
    pub fn effective_tge_percent(&self) -> f64 {
        if self.tge_eligible {
            self.tge_unlock_percent
        } else {
            0.0
        }
    }
}

// ── PlannerConfiguration ─────────────────────────────────────────────────────

/// Live, editable planner input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfiguration {
    pub total_supply: TokenAmount,
    pub initial_token_price_usd: f64,
    /// Optional calendar date of the TGE. Only used to label months.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tge_date: Option<NaiveDate>,
    /// Display order is insertion order.
    #[serde(default)]
    pub categories: Vec<AllocationCategory>,
}

impl PlannerConfiguration {
    pub fn new(total_supply: TokenAmount, initial_token_price_usd: f64) -> Self {
        Self {
            total_supply,
            initial_token_price_usd,
            tge_date: None,
            categories: Vec::new(),
        }
    }

    /// Append a category. Names must be unique.
    pub fn push_category(&mut self, category: AllocationCategory) -> Result<(), PlannerError> {
        if self.category(&category.name).is_some() {
            return Err(PlannerError::DuplicateCategory(category.name));
        }
        self.categories.push(category);
        Ok(())
    }

    pub fn category(&self, name: &str) -> Option<&AllocationCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn category_mut(&mut self, name: &str) -> Result<&mut AllocationCategory, PlannerError> {
        self.categories
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| PlannerError::UnknownCategory(name.to_string()))
    }

    /// Sum of all category percentages, as floating point for display.
    pub fn total_percentage(&self) -> f64 {
        self.categories.iter().map(|c| c.percentage).sum()
    }

    /// Sum of all category percentages in basis points.
    pub fn total_allocation_bps(&self) -> i64 {
        self.categories
            .iter()
            .map(|c| percent_to_bps(c.percentage))
            .fold(0, i64::saturating_add)
    }

    pub fn is_over_allocated(&self) -> bool {
        self.total_allocation_bps() > MAX_ALLOCATION_BPS
    }

    /// Sum of percentages of every category of the given kind.
    pub fn percentage_of_kind(&self, kind: CategoryKind) -> f64 {
        self.categories
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.percentage)
            .sum()
    }

    pub fn set_tge_unlock_percent(&mut self, name: &str, value: f64) -> Result<(), PlannerError> {
        self.category_mut(name)?.tge_unlock_percent = value;
        Ok(())
    }

    pub fn set_cliff_months(&mut self, name: &str, value: Months) -> Result<(), PlannerError> {
        self.category_mut(name)?.cliff_months = value;
        Ok(())
    }

    pub fn set_vesting_duration_months(
        &mut self,
        name: &str,
        value: Months,
    ) -> Result<(), PlannerError> {
        self.category_mut(name)?.vesting_duration_months = value;
        Ok(())
    }

    /// Structural checks applied to configurations read from outside:
    /// unique names, positive supply and price. Aggregate allocation is not
    /// checked here; it is only guarded on edit.
    pub fn validate(&self) -> Result<(), PlannerError> {
        if !(self.total_supply > 0.0) {
            return Err(PlannerError::InvalidTotalSupply(self.total_supply));
        }
        if !(self.initial_token_price_usd > 0.0) {
            return Err(PlannerError::InvalidTokenPrice(self.initial_token_price_usd));
        }
        let mut seen = HashSet::new();
        for c in &self.categories {
            if !seen.insert(c.name.as_str()) {
                return Err(PlannerError::DuplicateCategory(c.name.clone()));
            }
        }
        Ok(())
    }
}

/// Round a percentage to whole basis points.
pub fn percent_to_bps(percent: f64) -> i64 {
    (percent * BPS_PER_PERCENT).round() as i64
}

// ── UnlockSchedulePoint ──────────────────────────────────────────────────────

/// One month of a derived unlock schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnlockSchedulePoint {
    /// 1-based month index; month 1 is the TGE month.
    pub month: u32,
    pub circulating_increment: TokenAmount,
    pub cumulative_circulating: TokenAmount,
    pub percent_circulating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PlannerConfiguration {
        let mut cfg = PlannerConfiguration::new(1_000_000.0, 0.5);
        cfg.push_category(AllocationCategory::new("team", CategoryKind::Team, 15.0))
            .unwrap();
        cfg.push_category(AllocationCategory::new("lp", CategoryKind::Liquidity, 5.5))
            .unwrap();
        cfg
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut cfg = config();
        let err = cfg
            .push_category(AllocationCategory::new("team", CategoryKind::Other, 1.0))
            .unwrap_err();
        assert!(matches!(err, PlannerError::DuplicateCategory(n) if n == "team"));
        assert_eq!(cfg.categories.len(), 2);
    }

    #[test]
    fn fractional_percentages_sum_exactly_in_bps() {
        let mut cfg = PlannerConfiguration::new(1.0, 1.0);
        cfg.push_category(AllocationCategory::new("a", CategoryKind::Other, 33.33))
            .unwrap();
        cfg.push_category(AllocationCategory::new("b", CategoryKind::Other, 33.33))
            .unwrap();
        cfg.push_category(AllocationCategory::new("c", CategoryKind::Other, 33.34))
            .unwrap();
        assert_eq!(cfg.total_allocation_bps(), MAX_ALLOCATION_BPS);
        assert!(!cfg.is_over_allocated());
    }

    #[test]
    fn huge_percentages_saturate_the_total() {
        let mut cfg = PlannerConfiguration::new(1.0, 1.0);
        cfg.push_category(AllocationCategory::new("a", CategoryKind::Other, 1e300))
            .unwrap();
        cfg.push_category(AllocationCategory::new("b", CategoryKind::Other, 1e300))
            .unwrap();
        assert_eq!(cfg.total_allocation_bps(), i64::MAX);
        assert!(cfg.is_over_allocated());
    }

    #[test]
    fn ineligible_category_has_no_tge_share() {
        let mut c = AllocationCategory::new("treasury", CategoryKind::Treasury, 10.0);
        c.tge_unlock_percent = 50.0;
        assert_eq!(c.effective_tge_percent(), 0.0);
        assert_eq!(c.with_tge(50.0).effective_tge_percent(), 50.0);
    }

    #[test]
    fn setters_require_known_category() {
        let mut cfg = config();
        cfg.set_cliff_months("team", 12).unwrap();
        assert_eq!(cfg.category("team").unwrap().cliff_months, 12);
        assert!(matches!(
            cfg.set_vesting_duration_months("nope", 3),
            Err(PlannerError::UnknownCategory(_))
        ));
    }

    #[test]
    fn validate_rejects_non_positive_supply_and_price() {
        let mut cfg = config();
        assert!(cfg.validate().is_ok());
        cfg.total_supply = 0.0;
        assert!(matches!(cfg.validate(), Err(PlannerError::InvalidTotalSupply(_))));
        cfg.total_supply = 1.0;
        cfg.initial_token_price_usd = f64::NAN;
        assert!(matches!(cfg.validate(), Err(PlannerError::InvalidTokenPrice(_))));
    }

    #[test]
    fn missing_optional_fields_default_on_deserialize() {
        let json = r#"{
            "total_supply": 100.0,
            "initial_token_price_usd": 1.0,
            "categories": [{ "name": "dev", "percentage": 20.0 }]
        }"#;
        let cfg: PlannerConfiguration = serde_json::from_str(json).unwrap();
        let dev = cfg.category("dev").unwrap();
        assert_eq!(dev.kind, CategoryKind::Other);
        assert!(!dev.tge_eligible);
        assert_eq!(dev.tge_unlock_percent, 0.0);
        assert_eq!(dev.vesting_duration_months, 0);
        assert!(cfg.tge_date.is_none());
    }

    #[test]
    fn percentage_of_kind_sums_matching_categories() {
        let mut cfg = config();
        cfg.push_category(AllocationCategory::new("advisors", CategoryKind::Team, 7.0))
            .unwrap();
        assert_eq!(cfg.percentage_of_kind(CategoryKind::Team), 22.0);
        assert_eq!(cfg.percentage_of_kind(CategoryKind::Treasury), 0.0);
    }
}
