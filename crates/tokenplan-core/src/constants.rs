/// ─── Tokenplan Constants ────────────────────────────────────────────────────
///
/// Horizon, fixed-point scale and warning thresholds shared by every crate.

// ── Schedule ─────────────────────────────────────────────────────────────────

/// Number of monthly points in every unlock schedule. Index 0 is the TGE month.
pub const SCHEDULE_HORIZON_MONTHS: usize = 48;

// ── Percentages ──────────────────────────────────────────────────────────────

/// Percentages are compared in basis points (1% = 100 bps) so that fractional
/// shares like 33.33 + 66.67 sum to exactly 100%.
pub const BPS_PER_PERCENT: f64 = 100.0;

/// 100% expressed in basis points. Upper bound for the aggregate allocation.
pub const MAX_ALLOCATION_BPS: i64 = 10_000;

// ── Warning thresholds ───────────────────────────────────────────────────────

/// Circulating share at TGE (percent) above which the unlock is flagged.
pub const HIGH_TGE_UNLOCK_PERCENT: f64 = 25.0;

/// FDV / initial market cap above which future dilution is flagged.
pub const HIGH_FDV_TO_MCAP_RATIO: f64 = 100.0;

/// Team share (percent) above which the allocation is flagged.
pub const HIGH_TEAM_ALLOCATION_PERCENT: f64 = 20.0;

/// Liquidity share (percent) below which the allocation is flagged.
pub const LOW_LIQUIDITY_ALLOCATION_PERCENT: f64 = 5.0;

// ── Display ──────────────────────────────────────────────────────────────────

/// Pie-chart palette, cycled in category display order.
pub const ALLOCATION_PALETTE: [&str; 7] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD", "#D4A5A5", "#9B59B6",
];
