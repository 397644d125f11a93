//! Racial constants dispatch table.
//!
//! Every race-specific rate in the balance library lives here, in one
//! immutable mapping from [`Race`] to a [`RaceTraits`] row. Call sites never
//! carry their own per-race defaults; the single fallback for names outside
//! the table is [`FALLBACK_TRAITS`], documented below.
//!
//! Balance ceiling: no race's summon rate may exceed a 60% advantage over
//! the weakest race, and no pairwise advantage within the high-magic subset
//! may exceed 60%. The table tests enforce both.

use regna_types::Race;

/// Per-race display names for the six building categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingNames {
    /// Income category.
    pub income: &'static str,
    /// Peasant housing category.
    pub peasant: &'static str,
    /// Troop category.
    pub troop: &'static str,
    /// Buildrate category.
    pub buildrate: &'static str,
    /// Magic category.
    pub magic: &'static str,
    /// Fortress category.
    pub fortress: &'static str,
}

/// The full constants row for one race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceTraits {
    /// Troop-summon yield rate in basis points of total land (200 = 2.00%).
    pub summon_rate_bp: u64,
    /// Elan capacity multiplier in hundredths (100 = 1.0x, range 90--150).
    pub elan_multiplier_pct: u64,
    /// Whether this race generates elan at the high-magic rate.
    pub high_magic: bool,
    /// Backlash temple-loss rate in basis points (1200 = 12%).
    pub backlash_rate_bp: u64,
    /// Building display names.
    pub building_names: BuildingNames,
}

/// Default backlash rate applied to races without a specific entry.
pub const DEFAULT_BACKLASH_RATE_BP: u64 = 1200;

/// Traits used for any race name outside the table.
///
/// This is the only fallback in the library: baseline human rates with the
/// raw category keys as building names.
pub const FALLBACK_TRAITS: RaceTraits = RaceTraits {
    summon_rate_bp: 200,
    elan_multiplier_pct: 100,
    high_magic: false,
    backlash_rate_bp: DEFAULT_BACKLASH_RATE_BP,
    building_names: BuildingNames {
        income: "income",
        peasant: "peasant",
        troop: "troop",
        buildrate: "buildrate",
        magic: "magic",
        fortress: "fortress",
    },
};

const HUMAN: RaceTraits = RaceTraits {
    summon_rate_bp: 200,
    elan_multiplier_pct: 100,
    high_magic: false,
    backlash_rate_bp: DEFAULT_BACKLASH_RATE_BP,
    building_names: BuildingNames {
        income: "Guildhall",
        peasant: "Cottage",
        troop: "Barracks",
        buildrate: "Quarry",
        magic: "Temple",
        fortress: "Citadel",
    },
};

const SIDHE: RaceTraits = RaceTraits {
    summon_rate_bp: 304,
    elan_multiplier_pct: 150,
    high_magic: true,
    backlash_rate_bp: 1000,
    building_names: BuildingNames {
        income: "Trade Bower",
        peasant: "Glade Hollow",
        troop: "Warden Hall",
        buildrate: "Singing Quarry",
        magic: "Moon Temple",
        fortress: "Thorn Bastion",
    },
};

const DWARF: RaceTraits = RaceTraits {
    summon_rate_bp: 225,
    elan_multiplier_pct: 90,
    high_magic: false,
    backlash_rate_bp: DEFAULT_BACKLASH_RATE_BP,
    building_names: BuildingNames {
        income: "Trade Hall",
        peasant: "Stone Home",
        troop: "War Forge",
        buildrate: "Deep Quarry",
        magic: "Rune Shrine",
        fortress: "Mountain Gate",
    },
};

const ORC: RaceTraits = RaceTraits {
    summon_rate_bp: 280,
    elan_multiplier_pct: 110,
    high_magic: false,
    backlash_rate_bp: DEFAULT_BACKLASH_RATE_BP,
    building_names: BuildingNames {
        income: "Plunder Den",
        peasant: "Hovel",
        troop: "War Pit",
        buildrate: "Rock Pit",
        magic: "Blood Shrine",
        fortress: "Spike Wall",
    },
};

const TROLL: RaceTraits = RaceTraits {
    summon_rate_bp: 250,
    elan_multiplier_pct: 95,
    high_magic: false,
    backlash_rate_bp: 900,
    building_names: BuildingNames {
        income: "Toll Bridge",
        peasant: "Mud Hut",
        troop: "Fight Ring",
        buildrate: "Boulder Yard",
        magic: "Bone Shrine",
        fortress: "Stone Heap",
    },
};

const LICH: RaceTraits = RaceTraits {
    summon_rate_bp: 300,
    elan_multiplier_pct: 140,
    high_magic: true,
    backlash_rate_bp: 1500,
    building_names: BuildingNames {
        income: "Tithe Crypt",
        peasant: "Catacomb",
        troop: "Bone Yard",
        buildrate: "Grave Quarry",
        magic: "Dark Altar",
        fortress: "Black Keep",
    },
};

/// Look up the constants row for a race.
pub const fn traits(race: Race) -> &'static RaceTraits {
    match race {
        Race::Human => &HUMAN,
        Race::Sidhe => &SIDHE,
        Race::Dwarf => &DWARF,
        Race::Orc => &ORC,
        Race::Troll => &TROLL,
        Race::Lich => &LICH,
    }
}

/// Look up a constants row by wire name, case-insensitively.
///
/// Names outside the table resolve to [`FALLBACK_TRAITS`].
pub fn traits_by_name(name: &str) -> &'static RaceTraits {
    Race::parse(name).map_or(&FALLBACK_TRAITS, traits)
}
