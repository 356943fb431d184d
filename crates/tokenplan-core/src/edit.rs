//! Guarded percentage edit.
//!
//! The aggregate allocation is the only invariant enforced on edit. Other
//! fields are plain replacements (see the setters on `PlannerConfiguration`).

use tracing::debug;

use crate::constants::MAX_ALLOCATION_BPS;
use crate::error::PlannerError;
use crate::types::{percent_to_bps, PlannerConfiguration};

/// Return a copy of `config` with `category`'s percentage replaced, provided
/// the other categories plus `new_percentage` stay within 100%.
///
/// On `AllocationExceeded` the caller's configuration is untouched; callers
/// that want the silent-reject behaviour simply keep their current value.
pub fn apply_percentage_edit(
    config: &PlannerConfiguration,
    category: &str,
    new_percentage: f64,
) -> Result<PlannerConfiguration, PlannerError> {
    if config.category(category).is_none() {
        return Err(PlannerError::UnknownCategory(category.to_string()));
    }

    // NaN would round to 0 bps and slip through.
    if !new_percentage.is_finite() {
        debug!(category, new_percentage, "non-finite percentage rejected");
        return Err(PlannerError::AllocationExceeded {
            attempted_bps: i64::MAX,
            max_bps: MAX_ALLOCATION_BPS,
        });
    }

    let others_bps = config
        .categories
        .iter()
        .filter(|c| c.name != category)
        .map(|c| percent_to_bps(c.percentage))
        .fold(0i64, i64::saturating_add);
    let attempted_bps = others_bps.saturating_add(percent_to_bps(new_percentage));

    if attempted_bps > MAX_ALLOCATION_BPS {
        debug!(category, attempted_bps, "percentage edit rejected");
        return Err(PlannerError::AllocationExceeded {
            attempted_bps,
            max_bps: MAX_ALLOCATION_BPS,
        });
    }

    let mut next = config.clone();
    next.category_mut(category)?.percentage = new_percentage;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AllocationCategory, CategoryKind};

    fn config() -> PlannerConfiguration {
        let mut cfg = PlannerConfiguration::new(1_000_000_000.0, 0.001);
        for (name, pct) in [("a", 40.0), ("b", 30.0), ("c", 20.0)] {
            cfg.push_category(AllocationCategory::new(name, CategoryKind::Other, pct))
                .unwrap();
        }
        cfg
    }

    #[test]
    fn edit_within_budget_is_applied() {
        let cfg = config();
        let next = apply_percentage_edit(&cfg, "c", 30.0).unwrap();
        assert_eq!(next.category("c").unwrap().percentage, 30.0);
        assert_eq!(next.total_allocation_bps(), MAX_ALLOCATION_BPS);
        // input untouched
        assert_eq!(cfg.category("c").unwrap().percentage, 20.0);
    }

    #[test]
    fn edit_over_budget_is_rejected_and_config_unchanged() {
        let cfg = config();
        let before = serde_json::to_vec(&cfg).unwrap();
        let err = apply_percentage_edit(&cfg, "a", 50.01).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::AllocationExceeded { attempted_bps: 10_001, max_bps: 10_000 }
        ));
        assert_eq!(serde_json::to_vec(&cfg).unwrap(), before);
    }

    #[test]
    fn lowering_an_over_allocated_config_is_still_guarded() {
        let mut cfg = config();
        cfg.categories[0].percentage = 80.0; // 130% total, loaded as-is
        // still above 100 after the edit
        assert!(apply_percentage_edit(&cfg, "a", 60.0).is_err());
        assert!(apply_percentage_edit(&cfg, "a", 50.0).is_ok());
    }

    #[test]
    fn fractional_drift_does_not_reject_exact_total() {
        let mut cfg = PlannerConfiguration::new(1.0, 1.0);
        cfg.push_category(AllocationCategory::new("x", CategoryKind::Other, 0.1))
            .unwrap();
        cfg.push_category(AllocationCategory::new("y", CategoryKind::Other, 0.2))
            .unwrap();
        cfg.push_category(AllocationCategory::new("z", CategoryKind::Other, 0.0))
            .unwrap();
        // 0.1 + 0.2 is not exactly 0.3 in f64
        assert!(apply_percentage_edit(&cfg, "z", 99.7).is_ok());
    }

    #[test]
    fn non_finite_percentages_are_rejected() {
        let cfg = config();
        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(matches!(
                apply_percentage_edit(&cfg, "b", value),
                Err(PlannerError::AllocationExceeded { .. })
            ));
        }
    }

    #[test]
    fn huge_percentage_saturates_instead_of_overflowing() {
        let cfg = config();
        let err = apply_percentage_edit(&cfg, "b", 1e300).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::AllocationExceeded { attempted_bps: i64::MAX, .. }
        ));
    }

    #[test]
    fn unknown_category_is_an_error() {
        let cfg = config();
        assert!(matches!(
            apply_percentage_edit(&cfg, "missing", 1.0),
            Err(PlannerError::UnknownCategory(_))
        ));
    }
}
