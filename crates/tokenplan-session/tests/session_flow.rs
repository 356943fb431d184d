//! Drives a session the way an input panel would and checks that every
//! view reflects the latest edits.

use tokenplan_schedule::PlannerWarning;
use tokenplan_session::{EditField, EditStatus, PlannerSession};

#[test]
fn reference_session_view_is_consistent() {
    let session = PlannerSession::default();
    let view = session.view();

    assert_eq!(view.schedule.len(), 48);
    assert_eq!(view.series.len(), 48);
    assert_eq!(view.slices.len(), 7);
    assert_eq!(view.slices[2].label, "Team And Advisors");
    assert_eq!(view.allocation.total_bps, 10_000);
    assert!(view.chart_options.show_grid && view.chart_options.show_legend);
    assert!(view.expanded_category.is_none());
    assert!(view.expanded_fields.is_empty());

    // TGE: 2% + 0.75% + 0.75% + 1% of supply
    let tge = view.metrics.tge_circulating;
    let expected_tge = 20_000_000.0 + 7_500_000.0 + 7_500_000.0 + 10_000_000.0;
    // publicSale and liquidityPool also vest from month index 0
    let expected_first_vesting = 180_000_000.0 / 12.0 + 40_000_000.0 / 24.0;
    assert!((tge - (expected_tge + expected_first_vesting)).abs() < 1e-3);
}

#[test]
fn edits_flow_into_the_next_view() {
    let mut session = PlannerSession::default();

    // free up room, then push the team share over the warning threshold
    assert_eq!(
        session.set_percentage("development", 10.0).unwrap(),
        EditStatus::Applied
    );
    assert_eq!(
        session.set_percentage("teamAndAdvisors", 25.0).unwrap(),
        EditStatus::Applied
    );
    assert!(session
        .view()
        .metrics
        .warnings
        .contains(&PlannerWarning::HighTeamAllocation));

    // no room left: rejected silently
    assert_eq!(
        session.set_percentage("liquidityPool", 6.0).unwrap(),
        EditStatus::Rejected
    );
    assert_eq!(
        session.config().category("liquidityPool").unwrap().percentage,
        5.0
    );

    session
        .set_field("liquidityPool", EditField::TgeUnlockPercent, 100.0)
        .unwrap();
    session
        .set_field("liquidityPool", EditField::VestingDurationMonths, 0.0)
        .unwrap();
    let view = session.view();
    let lp_tokens = 50_000_000.0;
    assert!(view.schedule[47].cumulative_circulating >= lp_tokens);
}

#[test]
fn expanded_fields_follow_tge_eligibility() {
    let mut session = PlannerSession::default();

    session.toggle_category("publicSale").unwrap();
    let fields = session.view().expanded_fields;
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0], EditField::TgeUnlockPercent);

    session.toggle_category("treasury").unwrap();
    let view = session.view();
    assert_eq!(
        view.expanded_category.as_ref().map(|c| c.name.as_str()),
        Some("treasury")
    );
    assert_eq!(
        view.expanded_fields,
        vec![EditField::CliffMonths, EditField::VestingDurationMonths]
    );
}

#[test]
fn chart_toggles_and_tge_date_reach_the_view() {
    let mut session = PlannerSession::default();
    session.set_show_grid(false);
    session.set_tge_date(chrono::NaiveDate::from_ymd_opt(2025, 3, 15));

    let view = session.view();
    assert!(!view.chart_options.show_grid);
    assert!(view.chart_options.show_legend);
    assert_eq!(view.series[0].date, chrono::NaiveDate::from_ymd_opt(2025, 3, 15));
    assert_eq!(view.series[12].date, chrono::NaiveDate::from_ymd_opt(2026, 3, 15));
}

#[test]
fn supply_and_price_changes_recompute_valuations() {
    let mut session = PlannerSession::default();
    session.set_total_supply(2_000_000_000.0);
    session.set_token_price(0.5);
    let m = session.view().metrics;
    assert!((m.fully_diluted_valuation - 1_000_000_000.0).abs() < 1e-3);
    assert!((m.initial_market_cap - m.tge_circulating * 0.5).abs() < 1e-6);
}

#[test]
fn view_serializes_for_external_renderers() {
    let view = PlannerSession::default().view();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["schedule"].as_array().unwrap().len(), 48);
    assert_eq!(json["chart_options"]["show_grid"], true);
}
