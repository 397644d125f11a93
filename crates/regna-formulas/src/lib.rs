//! Deterministic balance formulas for the Regna rules engine.
//!
//! Every function in this crate is pure: no I/O, no clocks, no randomness.
//! The same inputs always produce the same outputs, and all fractional rates
//! are exact decimal or basis-point integer arithmetic -- binary floating
//! point never appears. Constants are process-wide, immutable, and
//! thread-safe by construction.
//!
//! # Modules
//!
//! - [`races`] -- The racial constants dispatch table ([`races::RaceTraits`])
//! - [`combat`] -- Land-gain ranges from force ratios
//! - [`construction`] -- Build-rate-turns, build turns, efficiency warnings
//! - [`summon`] -- Race-specific troop-summon yields
//! - [`elan`] -- Elan generation, capacity, post-cast clamping, backlash
//! - [`naming`] -- Per-race building display names
//! - [`spells`] -- The spell cost catalog
//! - [`economy`] -- Action costs and per-turn generation rates

pub mod combat;
pub mod construction;
pub mod economy;
pub mod elan;
pub mod naming;
pub mod races;
pub mod spells;
pub mod summon;

// Re-export the primary formula surface at crate root for convenience.
pub use combat::{BattleResult, LandGain, land_gain_range};
pub use construction::{
    EfficiencyWarning, build_efficiency_warning, build_rate_turns, build_turns,
};
pub use economy::{
    CLAIM_GOLD_COST, building_gold_cost, gold_income, population_cap, population_growth,
    quarry_percentage, unit_gold_cost,
};
pub use elan::{BACKLASH_TURNS_COST, Backlash, backlash, elan_after_cast, elan_generation, max_elan};
pub use naming::building_display_name;
pub use races::{BuildingNames, FALLBACK_TRAITS, RaceTraits, traits, traits_by_name};
pub use spells::{SpellCost, spell_cost};
pub use summon::summon_troops;
