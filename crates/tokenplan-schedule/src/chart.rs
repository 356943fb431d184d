//! Data series for the allocation pie and the circulating-supply line chart.
//! Rendering itself belongs to whatever front end consumes these.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokenplan_core::constants::ALLOCATION_PALETTE;
use tokenplan_core::types::{PlannerConfiguration, TokenAmount, UnlockSchedulePoint};

/// One pie-chart slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub name: String,
    pub label: String,
    pub percentage: f64,
    pub token_amount: TokenAmount,
    pub color: &'static str,
}

/// One line-chart point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirculatingPoint {
    pub month: u32,
    pub percent_circulating: f64,
    /// Calendar date of the month, when the TGE date is known.
    pub date: Option<NaiveDate>,
}

/// Slices in category display order, colours cycling through the palette.
pub fn allocation_slices(config: &PlannerConfiguration) -> Vec<AllocationSlice> {
    config
        .categories
        .iter()
        .enumerate()
        .map(|(idx, c)| AllocationSlice {
            name: c.name.clone(),
            label: humanize_label(&c.name),
            percentage: c.percentage,
            token_amount: c.token_amount(config.total_supply),
            color: ALLOCATION_PALETTE[idx % ALLOCATION_PALETTE.len()],
        })
        .collect()
}

pub fn circulating_series(
    schedule: &[UnlockSchedulePoint],
    tge_date: Option<NaiveDate>,
) -> Vec<CirculatingPoint> {
    schedule
        .iter()
        .map(|p| CirculatingPoint {
            month: p.month,
            percent_circulating: p.percent_circulating,
            date: tge_date.and_then(|d| month_date(d, p.month)),
        })
        .collect()
}

/// Calendar date of 1-based `month`; month 1 is the TGE date itself.
pub fn month_date(tge_date: NaiveDate, month: u32) -> Option<NaiveDate> {
    tge_date.checked_add_months(chrono::Months::new(month.saturating_sub(1)))
}

/// `teamAndAdvisors` → `Team And Advisors`; `liquidity_pool` → `Liquidity Pool`.
pub fn humanize_label(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut word_start = true;
    for ch in name.chars() {
        if ch == '_' || ch == '-' || ch == ' ' {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            word_start = true;
            continue;
        }
        if ch.is_uppercase() && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
        if word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        word_start = false;
    }
    out
}
