use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokenplan_core::edit::apply_percentage_edit;
use tokenplan_core::error::PlannerError;
use tokenplan_core::types::{Months, PlannerConfiguration};
use tokenplan_presets::reference_configuration;
use tracing::debug;

use crate::view::PlannerView;

/// Line-chart display toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub show_grid: bool,
    pub show_legend: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_legend: true,
        }
    }
}

/// Per-category field a user can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditField {
    Percentage,
    TgeUnlockPercent,
    CliffMonths,
    VestingDurationMonths,
}

impl FromStr for EditField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "percentage" | "pct" => Ok(EditField::Percentage),
            "tge" | "tge_unlock_percent" => Ok(EditField::TgeUnlockPercent),
            "cliff" | "cliff_months" => Ok(EditField::CliffMonths),
            "duration" | "vesting" | "vesting_duration_months" => {
                Ok(EditField::VestingDurationMonths)
            }
            other => Err(format!(
                "unknown field `{other}` (expected percentage, tge, cliff or duration)"
            )),
        }
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EditField::Percentage => "percentage",
            EditField::TgeUnlockPercent => "tge",
            EditField::CliffMonths => "cliff",
            EditField::VestingDurationMonths => "duration",
        };
        f.pad(s)
    }
}

/// Outcome of a field edit. Only percentage edits can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStatus {
    Applied,
    Rejected,
}

/// State of one interactive planning session.
///
/// The session owns the live configuration plus view toggles; the
/// calculator only ever sees the configuration by reference.
#[derive(Debug, Clone)]
pub struct PlannerSession {
    config: PlannerConfiguration,
    expanded_category: Option<String>,
    chart_options: ChartOptions,
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::new(reference_configuration())
    }
}

impl PlannerSession {
    pub fn new(config: PlannerConfiguration) -> Self {
        Self {
            config,
            expanded_category: None,
            chart_options: ChartOptions::default(),
        }
    }

    pub fn config(&self) -> &PlannerConfiguration {
        &self.config
    }

    pub fn into_config(self) -> PlannerConfiguration {
        self.config
    }

    pub fn expanded_category(&self) -> Option<&str> {
        self.expanded_category.as_deref()
    }

    pub fn chart_options(&self) -> ChartOptions {
        self.chart_options
    }

    /// Replace a category's percentage unless the aggregate would exceed
    /// 100%. A rejected edit leaves the configuration as it was and is not
    /// an error.
    pub fn set_percentage(
        &mut self,
        category: &str,
        value: f64,
    ) -> Result<EditStatus, PlannerError> {
        match apply_percentage_edit(&self.config, category, value) {
            Ok(next) => {
                self.config = next;
                Ok(EditStatus::Applied)
            }
            Err(PlannerError::AllocationExceeded { attempted_bps, .. }) => {
                debug!(category, value, attempted_bps, "ignoring over-allocating edit");
                Ok(EditStatus::Rejected)
            }
            Err(e) => Err(e),
        }
    }

    /// Generic entry point for input widgets. Month fields are rounded to
    /// whole months.
    pub fn set_field(
        &mut self,
        category: &str,
        field: EditField,
        value: f64,
    ) -> Result<EditStatus, PlannerError> {
        match field {
            EditField::Percentage => return self.set_percentage(category, value),
            EditField::TgeUnlockPercent => self.config.set_tge_unlock_percent(category, value)?,
            EditField::CliffMonths => self.config.set_cliff_months(category, to_months(value))?,
            EditField::VestingDurationMonths => self
                .config
                .set_vesting_duration_months(category, to_months(value))?,
        }
        debug!(category, %field, value, "field updated");
        Ok(EditStatus::Applied)
    }

    pub fn set_total_supply(&mut self, total_supply: f64) {
        self.config.total_supply = total_supply;
    }

    pub fn set_token_price(&mut self, price_usd: f64) {
        self.config.initial_token_price_usd = price_usd;
    }

    pub fn set_tge_date(&mut self, date: Option<NaiveDate>) {
        self.config.tge_date = date;
    }

    /// Expand `category`, or collapse it if it is already expanded. At most
    /// one category is expanded at a time.
    pub fn toggle_category(&mut self, category: &str) -> Result<(), PlannerError> {
        if self.config.category(category).is_none() {
            return Err(PlannerError::UnknownCategory(category.to_string()));
        }
        if self.expanded_category.as_deref() == Some(category) {
            self.expanded_category = None;
        } else {
            self.expanded_category = Some(category.to_string());
        }
        Ok(())
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.chart_options.show_grid = show;
    }

    pub fn set_show_legend(&mut self, show: bool) {
        self.chart_options.show_legend = show;
    }

    /// Recompute everything a front end displays.
    pub fn view(&self) -> PlannerView {
        PlannerView::build(&self.config, self.expanded_category.as_deref(), self.chart_options)
    }
}

fn to_months(value: f64) -> Months {
    value.round() as Months
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_percentage_edit_keeps_state() {
        let mut session = PlannerSession::default();
        let before = session.config().clone();
        let status = session.set_percentage("publicSale", 21.0).unwrap();
        assert_eq!(status, EditStatus::Rejected);
        assert_eq!(session.config(), &before);
    }

    #[test]
    fn accepted_percentage_edit_is_applied() {
        let mut session = PlannerSession::default();
        session.set_percentage("treasury", 5.0).unwrap();
        let status = session.set_percentage("publicSale", 25.0).unwrap();
        assert_eq!(status, EditStatus::Applied);
        assert_eq!(session.config().category("publicSale").unwrap().percentage, 25.0);
    }

    #[test]
    fn unknown_category_is_reported() {
        let mut session = PlannerSession::default();
        assert!(session.set_percentage("nope", 1.0).is_err());
        assert!(session.set_field("nope", EditField::CliffMonths, 1.0).is_err());
        assert!(session.toggle_category("nope").is_err());
    }

    #[test]
    fn into_config_keeps_applied_edits() {
        let mut session = PlannerSession::default();
        session
            .set_field("ecosystem", EditField::TgeUnlockPercent, 8.0)
            .unwrap();
        session.set_percentage("publicSale", 99.0).unwrap();
        let config = session.into_config();
        let ecosystem = config.category("ecosystem").unwrap();
        assert_eq!(ecosystem.tge_unlock_percent, 8.0);
        assert_eq!(config.category("publicSale").unwrap().percentage, 20.0);
    }

    #[test]
    fn month_fields_are_rounded() {
        let mut session = PlannerSession::default();
        session
            .set_field("development", EditField::CliffMonths, 2.6)
            .unwrap();
        session
            .set_field("development", EditField::VestingDurationMonths, 11.4)
            .unwrap();
        let dev = session.config().category("development").unwrap();
        assert_eq!(dev.cliff_months, 3);
        assert_eq!(dev.vesting_duration_months, 11);
    }

    #[test]
    fn toggle_expands_one_category_at_a_time() {
        let mut session = PlannerSession::default();
        session.toggle_category("treasury").unwrap();
        assert_eq!(session.expanded_category(), Some("treasury"));
        session.toggle_category("ecosystem").unwrap();
        assert_eq!(session.expanded_category(), Some("ecosystem"));
        session.toggle_category("ecosystem").unwrap();
        assert_eq!(session.expanded_category(), None);
    }

    #[test]
    fn edit_field_parses_aliases() {
        assert_eq!("tge".parse::<EditField>().unwrap(), EditField::TgeUnlockPercent);
        assert_eq!("Duration".parse::<EditField>().unwrap(), EditField::VestingDurationMonths);
        assert!("price".parse::<EditField>().is_err());
    }
}
