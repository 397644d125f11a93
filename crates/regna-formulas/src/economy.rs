//! Action costs and per-turn generation rates.
//!
//! Every gold price and generation rate the resolution handlers charge lives
//! here as a fixed design constant. All values are whole integers.

use regna_types::{BuildingKind, UnitKind};
use rust_decimal::Decimal;

/// Flat gold cost of claiming a territory, independent of type and terrain.
pub const CLAIM_GOLD_COST: u64 = 500;

/// Gold generated per peasant per turn.
pub const GOLD_PER_PEASANT: u64 = 2;

/// Gold generated per income building per turn.
pub const GOLD_PER_INCOME_BUILDING: u64 = 60;

/// Population growth per peasant-housing building per turn.
pub const GROWTH_PER_HOUSING: u64 = 25;

/// Peasants each acre of land can sustain.
pub const POPULATION_PER_ACRE: u64 = 25;

/// Gold cost of constructing one building of the given kind.
pub const fn building_gold_cost(kind: BuildingKind) -> u64 {
    match kind {
        BuildingKind::Guildhall => 400,
        BuildingKind::Cottage => 150,
        BuildingKind::Barracks => 300,
        BuildingKind::Quarry => 250,
        BuildingKind::Temple => 350,
        BuildingKind::Citadel => 600,
    }
}

/// Gold cost of equipping one trained unit of the given kind.
pub const fn unit_gold_cost(kind: UnitKind) -> u64 {
    match kind {
        UnitKind::Infantry => 50,
        UnitKind::Ranged => 75,
        UnitKind::Mounted => 125,
        UnitKind::Elite => 250,
    }
}

/// Gold generated in one turn.
pub fn gold_income(population: u64, income_buildings: u64) -> u64 {
    let from_peasants = population.saturating_mul(GOLD_PER_PEASANT);
    let from_buildings = income_buildings.saturating_mul(GOLD_PER_INCOME_BUILDING);
    from_peasants.saturating_add(from_buildings)
}

/// Maximum population the kingdom's land can sustain.
pub fn population_cap(land: u64) -> u64 {
    land.saturating_mul(POPULATION_PER_ACRE)
}

/// Population growth for one turn, capped so the total never exceeds `cap`.
pub fn population_growth(current: u64, housing_buildings: u64, cap: u64) -> u64 {
    let headroom = cap.saturating_sub(current);
    housing_buildings.saturating_mul(GROWTH_PER_HOUSING).min(headroom)
}

/// Quarry buildings as a percentage of total land.
///
/// This is the input to [`crate::construction::build_rate_turns`]. A kingdom
/// with no land has a zero quarry percentage.
pub fn quarry_percentage(quarries: u64, land: u64) -> Decimal {
    if land == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(quarries)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(Decimal::from(land)))
        .unwrap_or(Decimal::ZERO)
}
