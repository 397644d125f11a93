//! Combat land-gain ranges from force ratios.
//!
//! The attack/defense ratio selects one of three result bands, evaluated
//! highest-ratio-first with inclusive lower edges. Band checks use integer
//! cross-multiplication so no division or floating point is involved:
//! `ratio >= 2.0` is `attack >= 2 * defense`, and `ratio >= 1.2` is
//! `5 * attack >= 6 * defense`.

use serde::{Deserialize, Serialize};

/// Land-gain window bounds in basis points of the defender's land.
const GAIN_MIN_BP: u128 = 679;
/// Upper bound for a `GoodFight` result (7.00%).
const GAIN_MAX_GOOD_FIGHT_BP: u128 = 700;
/// Upper bound for a `WithEase` result (7.35%).
const GAIN_MAX_WITH_EASE_BP: u128 = 735;

/// The result band of an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleResult {
    /// Ratio >= 2.0: the widest land-gain window.
    WithEase,
    /// Ratio in [1.2, 2.0): same lower bound, tighter upper bound.
    GoodFight,
    /// Ratio < 1.2: no land changes hands.
    Failed,
}

impl BattleResult {
    /// The canonical wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::WithEase => "with_ease",
            Self::GoodFight => "good_fight",
            Self::Failed => "failed",
        }
    }
}

/// A computed land-gain window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandGain {
    /// Which band the ratio fell into.
    pub result: BattleResult,
    /// Minimum acres gained.
    pub min: u64,
    /// Maximum acres gained.
    pub max: u64,
}

/// Floor of `land * bp / 10000` without overflow.
fn gain_floor(land: u64, bp: u128) -> u64 {
    let scaled = u128::from(land)
        .saturating_mul(bp)
        .checked_div(10_000)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Compute the land-gain window for an attack.
///
/// A zero defense power with any positive attack counts as `WithEase`
/// (the ratio is unbounded); zero attack against zero defense is `Failed`.
pub fn land_gain_range(attack_power: u64, defense_power: u64, defender_land: u64) -> LandGain {
    let attack = u128::from(attack_power);
    let defense = u128::from(defense_power);

    // ratio >= 2.0, inclusive; covers defense == 0 with attack > 0.
    let with_ease = attack >= defense.saturating_mul(2) && attack > 0;
    // ratio >= 1.2, inclusive.
    let good_fight = attack.saturating_mul(5) >= defense.saturating_mul(6) && attack > 0;

    if with_ease {
        LandGain {
            result: BattleResult::WithEase,
            min: gain_floor(defender_land, GAIN_MIN_BP),
            max: gain_floor(defender_land, GAIN_MAX_WITH_EASE_BP),
        }
    } else if good_fight {
        LandGain {
            result: BattleResult::GoodFight,
            min: gain_floor(defender_land, GAIN_MIN_BP),
            max: gain_floor(defender_land, GAIN_MAX_GOOD_FIGHT_BP),
        }
    } else {
        LandGain {
            result: BattleResult::Failed,
            min: 0,
            max: 0,
        }
    }
}
