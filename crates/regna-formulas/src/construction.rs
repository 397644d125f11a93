//! Build-rate-turns (BRT) and construction-turn formulas.
//!
//! BRT is a stepped lookup over fixed quarry-percentage breakpoints: the
//! greatest breakpoint at or below the input wins, so a value just under the
//! next breakpoint still uses the lower entry. The table is monotonically
//! non-decreasing.

use rust_decimal::Decimal;

/// Breakpoint table: (quarry percentage, BRT).
const BRT_TABLE: [(u32, u32); 21] = [
    (0, 4),
    (5, 6),
    (10, 8),
    (15, 10),
    (20, 12),
    (25, 14),
    (30, 16),
    (35, 18),
    (40, 19),
    (45, 20),
    (50, 21),
    (55, 22),
    (60, 23),
    (65, 24),
    (70, 25),
    (75, 26),
    (80, 27),
    (85, 28),
    (90, 29),
    (95, 30),
    (100, 31),
];

/// BRT for inputs below the first breakpoint.
const BRT_FLOOR: u32 = 4;

/// Build rate turns for a quarry percentage.
///
/// The lookup is "greatest breakpoint <= input": an input exactly at a
/// breakpoint uses that breakpoint's value. Inputs above 100 use the 100
/// entry; inputs below 0 use the 0 entry.
pub fn build_rate_turns(quarry_percentage: Decimal) -> u32 {
    let mut brt = BRT_FLOOR;
    for (breakpoint, value) in BRT_TABLE {
        if Decimal::from(breakpoint) <= quarry_percentage {
            brt = value;
        } else {
            break;
        }
    }
    brt
}

/// Turns required to construct `count` structures at the given BRT.
///
/// `ceil(count / brt)`, minimum 1 (even a zero-count order occupies a turn).
pub fn build_turns(count: u64, brt: u32) -> u64 {
    let per_turn = u64::from(brt);
    if count == 0 || per_turn == 0 {
        return 1;
    }
    count.div_ceil(per_turn).max(1)
}

/// A build order that pays for more turn capacity than it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EfficiencyWarning {
    /// Turns the order will take.
    pub turns: u64,
    /// Structures that could have been added for free in the same turns.
    pub wasted_capacity: u64,
}

impl core::fmt::Display for EfficiencyWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} more structure(s) could be built in the same {} turn(s)",
            self.wasted_capacity, self.turns
        )
    }
}

/// Warn when a build order does not fill whole turns.
///
/// Returns `None` exactly when `count` fills its turns completely
/// (`count` is a multiple of `brt`); otherwise the reported waste is
/// `turns * brt - count`.
pub fn build_efficiency_warning(count: u64, brt: u32) -> Option<EfficiencyWarning> {
    let turns = build_turns(count, brt);
    let capacity = turns.saturating_mul(u64::from(brt));
    let wasted = capacity.saturating_sub(count);
    if wasted == 0 {
        None
    } else {
        Some(EfficiencyWarning {
            turns,
            wasted_capacity: wasted,
        })
    }
}
