//! Per-race building display names.
//!
//! Presentation asks for names with raw strings, so this lookup stays at the
//! string level: race is matched case-insensitively against the dispatch
//! table, and an unknown race or unknown category returns the category key
//! unchanged. This function never fails.

use regna_types::Race;

use crate::races;

/// Display name for a building category under a race's naming scheme.
///
/// Categories are the fixed six: `income`, `peasant`, `troop`, `buildrate`,
/// `magic`, `fortress` (matched case-insensitively). Unknown race or unknown
/// category falls back to the category key unchanged.
pub fn building_display_name(race: &str, category: &str) -> String {
    let Some(known_race) = Race::parse(race) else {
        return category.to_owned();
    };
    let names = &races::traits(known_race).building_names;

    let name = if category.eq_ignore_ascii_case("income") {
        names.income
    } else if category.eq_ignore_ascii_case("peasant") {
        names.peasant
    } else if category.eq_ignore_ascii_case("troop") {
        names.troop
    } else if category.eq_ignore_ascii_case("buildrate") {
        names.buildrate
    } else if category.eq_ignore_ascii_case("magic") {
        names.magic
    } else if category.eq_ignore_ascii_case("fortress") {
        names.fortress
    } else {
        return category.to_owned();
    };

    name.to_owned()
}
