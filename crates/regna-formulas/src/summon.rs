//! Race-specific troop-summon yields.
//!
//! The summoning ritual converts a fixed fraction of the kingdom's total
//! land into troops. Rates come from the racial dispatch table and the
//! result is truncated to a whole number of troops.

use regna_types::Race;

use crate::races;

/// Troops yielded by one summoning ritual.
///
/// `truncate(total_land * rate)`, with the rate in basis points per race
/// (Human 200 = 2.00%, Sidhe 304 = 3.04%). Deterministic and linear in
/// `total_land`.
pub fn summon_troops(race: Race, total_land: u64) -> u64 {
    let rate_bp = races::traits(race).summon_rate_bp;
    let scaled = u128::from(total_land)
        .saturating_mul(u128::from(rate_bp))
        .checked_div(10_000)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
