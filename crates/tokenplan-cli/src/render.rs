//! Plain-text rendering of a `PlannerView`.

use std::fmt::Write as _;

use tokenplan_session::{EditField, PlannerView};

const BAR_WIDTH: f64 = 40.0;

pub fn schedule_table(view: &PlannerView) -> String {
    let mut out = String::new();
    let dated = view.series.iter().any(|p| p.date.is_some());

    let _ = writeln!(out, "Token unlock schedule (month 1 = TGE)");
    if view.chart_options.show_legend {
        let _ = writeln!(out, "  # = circulating supply %");
    }
    let _ = writeln!(
        out,
        "{:>5} {:>10} {:>18} {:>20} {:>8}  ",
        "month",
        if dated { "date" } else { "" },
        "unlocked",
        "circulating",
        "%"
    );

    for (point, series) in view.schedule.iter().zip(&view.series) {
        let date = series.date.map(|d| d.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>5} {:>10} {:>18} {:>20} {:>7.2}%  {}",
            point.month,
            date,
            format_amount(point.circulating_increment),
            format_amount(point.cumulative_circulating),
            point.percent_circulating,
            bar(point.percent_circulating),
        );
        if view.chart_options.show_grid && point.month % 12 == 0 {
            let _ = writeln!(out, "{}", "-".repeat(70));
        }
    }
    out
}

pub fn metrics_panel(view: &PlannerView) -> String {
    let m = &view.metrics;
    let mut out = String::new();
    let ratio = match m.fdv_to_mcap_ratio {
        Some(r) => format!("{r:.2}x"),
        None if m.fully_diluted_valuation > 0.0 => "∞".to_string(),
        None => "n/a".to_string(),
    };

    let _ = writeln!(out, "Initial Market Cap       ${}", format_amount(m.initial_market_cap));
    let _ = writeln!(out, "Fully Diluted Valuation  ${}", format_amount(m.fully_diluted_valuation));
    let _ = writeln!(out, "TGE Circulating          {}", format_amount(m.tge_circulating));
    let _ = writeln!(out, "TGE Circulating %        {:.2}%", m.tge_circulating_percent);
    let _ = writeln!(out, "FDV/MCap Ratio           {ratio}");

    if !m.warnings.is_empty() {
        let _ = writeln!(out);
        for warning in &m.warnings {
            let _ = writeln!(out, "Warning: {warning}");
        }
    }
    out
}

pub fn allocation_table(view: &PlannerView) -> String {
    let mut out = String::new();
    for slice in &view.slices {
        let expanded = view
            .expanded_category
            .as_ref()
            .is_some_and(|c| c.name == slice.name);
        let marker = if expanded { '-' } else { '+' };
        let _ = writeln!(
            out,
            "{marker} {:<20} {:>6.2}% {:>18} tokens  {}  {}",
            slice.label,
            slice.percentage,
            format_amount(slice.token_amount),
            slice.color,
            bar(slice.percentage),
        );
        if expanded {
            out.push_str(&expanded_panel(view));
        }
    }

    let allocation = &view.allocation;
    let status = if allocation.over_allocated { "OVER-ALLOCATED" } else { "ok" };
    let _ = writeln!(
        out,
        "Total Allocation {:.2}% ({status})",
        allocation.total_percentage
    );
    out
}

fn expanded_panel(view: &PlannerView) -> String {
    let mut out = String::new();
    let Some(category) = view.expanded_category.as_ref() else {
        return out;
    };
    for field in &view.expanded_fields {
        let value = match field {
            EditField::TgeUnlockPercent => format!("{}%", category.tge_unlock_percent),
            EditField::CliffMonths => format!("{} months", category.cliff_months),
            EditField::VestingDurationMonths => {
                format!("{} months", category.vesting_duration_months)
            }
            EditField::Percentage => continue,
        };
        let _ = writeln!(out, "      {field:<10} {value}");
    }
    out
}

fn bar(percent: f64) -> String {
    let cells = (percent.clamp(0.0, 100.0) / 100.0 * BAR_WIDTH).round() as usize;
    "#".repeat(cells)
}

/// Group thousands and keep at most two decimals: 1234567.5 → `1,234,567.5`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && rounded.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
