//! Enumeration types for the Regna rules engine.
//!
//! Raw action requests carry enum fields as wire names (plain strings); the
//! validation pipeline turns them into these types via the case-insensitive
//! `parse` constructors, rejecting unknown names with `INVALID_PARAM`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Race
// ---------------------------------------------------------------------------

/// The race of a kingdom, selecting formula variants across the balance
/// library (summon rates, elan rates, backlash rates, building names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Race {
    /// Baseline race; the balance anchor for every rate table.
    Human,
    /// High-magic race with the strongest summon yield.
    Sidhe,
    /// Mountain race favoring construction and fortification.
    Dwarf,
    /// Aggressive race with above-average summon yield.
    Orc,
    /// Hardy race with resilient temples.
    Troll,
    /// High-magic undead race.
    Lich,
}

impl Race {
    /// Every race, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Human,
        Self::Sidhe,
        Self::Dwarf,
        Self::Orc,
        Self::Troll,
        Self::Lich,
    ];

    /// The canonical lowercase wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Sidhe => "sidhe",
            Self::Dwarf => "dwarf",
            Self::Orc => "orc",
            Self::Troll => "troll",
            Self::Lich => "lich",
        }
    }

    /// Parse a wire name, case-insensitively. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|race| race.name().eq_ignore_ascii_case(name))
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A kingdom resource counter, named for sufficiency-failure reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Currency spent on claims, construction, and training.
    Gold,
    /// Peasants; drawn down when units are trained.
    Population,
    /// Elan, the magic resource generated by temples.
    Mana,
    /// Total land in acres across the kingdom.
    Land,
}

impl ResourceKind {
    /// The canonical lowercase wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Population => "population",
            Self::Mana => "mana",
            Self::Land => "land",
        }
    }
}

// ---------------------------------------------------------------------------
// Territory
// ---------------------------------------------------------------------------

/// The type of a claimed territory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TerritoryKind {
    /// The default territory type for a fresh claim.
    #[default]
    Settlement,
    /// A small forward position.
    Outpost,
    /// A fortified territory.
    Fortress,
    /// A territory devoted to magic.
    Sanctum,
}

impl TerritoryKind {
    /// Every territory kind, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Settlement,
        Self::Outpost,
        Self::Fortress,
        Self::Sanctum,
    ];

    /// The canonical lowercase wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Settlement => "settlement",
            Self::Outpost => "outpost",
            Self::Fortress => "fortress",
            Self::Sanctum => "sanctum",
        }
    }

    /// Parse a wire name, case-insensitively. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

/// The terrain a territory sits on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    /// The default terrain for a fresh claim.
    #[default]
    Plains,
    /// Dense woodland.
    Forest,
    /// Rolling hills.
    Hills,
    /// High mountains.
    Mountains,
    /// Wetlands.
    Swamp,
    /// Coastline.
    Coast,
}

impl TerrainKind {
    /// Every terrain kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Plains,
        Self::Forest,
        Self::Hills,
        Self::Mountains,
        Self::Swamp,
        Self::Coast,
    ];

    /// The canonical lowercase wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plains => "plains",
            Self::Forest => "forest",
            Self::Hills => "hills",
            Self::Mountains => "mountains",
            Self::Swamp => "swamp",
            Self::Coast => "coast",
        }
    }

    /// Parse a wire name, case-insensitively. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// A kind of building a kingdom can construct.
///
/// Each kind belongs to exactly one of the six functional categories used
/// by the per-race display-name table (income, peasant, troop, buildrate,
/// magic, fortress).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    /// Income category: generates gold each turn.
    Guildhall,
    /// Peasant category: houses population.
    Cottage,
    /// Troop category: supports trained units.
    Barracks,
    /// Buildrate category: raises the kingdom's build rate.
    Quarry,
    /// Magic category: generates and stores elan.
    Temple,
    /// Fortress category: raises territory defense.
    Citadel,
}

impl BuildingKind {
    /// Every building kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Guildhall,
        Self::Cottage,
        Self::Barracks,
        Self::Quarry,
        Self::Temple,
        Self::Citadel,
    ];

    /// The canonical lowercase wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Guildhall => "guildhall",
            Self::Cottage => "cottage",
            Self::Barracks => "barracks",
            Self::Quarry => "quarry",
            Self::Temple => "temple",
            Self::Citadel => "citadel",
        }
    }

    /// The display-name category key for this kind.
    pub const fn category(self) -> &'static str {
        match self {
            Self::Guildhall => "income",
            Self::Cottage => "peasant",
            Self::Barracks => "troop",
            Self::Quarry => "buildrate",
            Self::Temple => "magic",
            Self::Citadel => "fortress",
        }
    }

    /// Parse a wire name, case-insensitively. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// A kind of military unit a kingdom can train.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// The default trained unit.
    #[default]
    Infantry,
    /// Ranged troops.
    Ranged,
    /// Mounted troops.
    Mounted,
    /// Elite troops, the most expensive to equip.
    Elite,
}

impl UnitKind {
    /// Every unit kind, in declaration order.
    pub const ALL: [Self; 4] = [Self::Infantry, Self::Ranged, Self::Mounted, Self::Elite];

    /// The canonical lowercase wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Infantry => "infantry",
            Self::Ranged => "ranged",
            Self::Mounted => "mounted",
            Self::Elite => "elite",
        }
    }

    /// Parse a wire name, case-insensitively. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

// ---------------------------------------------------------------------------
// Spells
// ---------------------------------------------------------------------------

/// A spell a kingdom can cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Spell {
    /// Enriches a territory's farmland.
    FertileLands,
    /// Reveals another kingdom's holdings.
    Clairvoyance,
    /// Shields the kingdom's territories.
    ArcaneWard,
    /// Storm damage against a target territory.
    Tempest,
    /// Opens a rift; the most demanding ritual in the catalog.
    Riftgate,
}

impl Spell {
    /// Every spell, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::FertileLands,
        Self::Clairvoyance,
        Self::ArcaneWard,
        Self::Tempest,
        Self::Riftgate,
    ];

    /// The canonical lowercase wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FertileLands => "fertile_lands",
            Self::Clairvoyance => "clairvoyance",
            Self::ArcaneWard => "arcane_ward",
            Self::Tempest => "tempest",
            Self::Riftgate => "riftgate",
        }
    }

    /// Parse a wire name, case-insensitively. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|spell| spell.name().eq_ignore_ascii_case(name))
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The kind of action submitted to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionType {
    /// Claim a new territory for the kingdom.
    ClaimTerritory,
    /// Construct buildings.
    ConstructBuilding,
    /// Train (summon) units.
    TrainUnits,
    /// Cast a spell.
    CastSpell,
    /// Convert turns into generated resources.
    GenerateResources,
}

impl ActionType {
    /// The canonical wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClaimTerritory => "claim_territory",
            Self::ConstructBuilding => "construct_building",
            Self::TrainUnits => "train_units",
            Self::CastSpell => "cast_spell",
            Self::GenerateResources => "generate_resources",
        }
    }
}

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Machine-readable failure classification carried by every failed outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// A required identifier or field was absent.
    #[serde(rename = "MISSING_PARAMS")]
    MissingParams,
    /// A field failed a domain check (length, range, enum membership) or the
    /// action conflicts with existing state (duplicate coordinates).
    #[serde(rename = "INVALID_PARAM")]
    InvalidParam,
    /// The referenced aggregate does not exist.
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    /// The kingdom cannot pay the action's resource cost.
    #[serde(rename = "INSUFFICIENT_RESOURCES")]
    InsufficientResources,
    /// An unexpected failure; details are logged, never exposed.
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// The wire representation of this code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingParams => "MISSING_PARAMS",
            Self::InvalidParam => "INVALID_PARAM",
            Self::NotFound => "NOT_FOUND",
            Self::InsufficientResources => "INSUFFICIENT_RESOURCES",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
