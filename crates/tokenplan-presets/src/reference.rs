use tokenplan_core::types::{AllocationCategory, CategoryKind, PlannerConfiguration};

/// Default total supply of the reference configuration.
pub const REFERENCE_TOTAL_SUPPLY: f64 = 1_000_000_000.0;

/// Default TGE token price (USD) of the reference configuration.
pub const REFERENCE_TOKEN_PRICE_USD: f64 = 0.001;

/// The seven-category starting point offered to a new planner session.
///
/// | category        | %  | TGE % | cliff | vesting |
/// |-----------------|----|-------|-------|---------|
/// | publicSale      | 20 | 10    | 0     | 12      |
/// | privateRounds   | 15 | 5     | 6     | 24      |
/// | teamAndAdvisors | 15 | –     | 12    | 36      |
/// | development     | 20 | –     | 6     | 48      |
/// | ecosystem       | 15 | 5     | 3     | 36      |
/// | treasury        | 10 | –     | 12    | 48      |
/// | liquidityPool   | 5  | 20    | 0     | 24      |
pub fn reference_configuration() -> PlannerConfiguration {
    PlannerConfiguration {
        total_supply: REFERENCE_TOTAL_SUPPLY,
        initial_token_price_usd: REFERENCE_TOKEN_PRICE_USD,
        tge_date: None,
        categories: vec![
            AllocationCategory::new("publicSale", CategoryKind::PublicSale, 20.0)
                .with_tge(10.0)
                .with_vesting(0, 12),
            AllocationCategory::new("privateRounds", CategoryKind::PrivateRounds, 15.0)
                .with_tge(5.0)
                .with_vesting(6, 24),
            AllocationCategory::new("teamAndAdvisors", CategoryKind::Team, 15.0)
                .with_vesting(12, 36),
            AllocationCategory::new("development", CategoryKind::Development, 20.0)
                .with_vesting(6, 48),
            AllocationCategory::new("ecosystem", CategoryKind::Ecosystem, 15.0)
                .with_tge(5.0)
                .with_vesting(3, 36),
            AllocationCategory::new("treasury", CategoryKind::Treasury, 10.0)
                .with_vesting(12, 48),
            AllocationCategory::new("liquidityPool", CategoryKind::Liquidity, 5.0)
                .with_tge(20.0)
                .with_vesting(0, 24),
        ],
    }
}
