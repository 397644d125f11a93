//! Core entity structs: the Kingdom aggregate, its child entities, and the
//! explicit partial-update (patch) types.
//!
//! All resource counters are unsigned integers -- a mutation that would
//! drive a counter negative must be rejected by the engine before a patch is
//! built, never clamped silently. Partial updates go through
//! [`Kingdom::apply_patch`], which documents the field-by-field override
//! rule; there is no implicit object-spread merge anywhere.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{BuildingKind, Race, Spell, TerrainKind, TerritoryKind, UnitKind};
use crate::ids::{KingdomId, SpellEffectId, TerritoryId, UnitStackId};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Resource counters held by a kingdom or a territory.
///
/// Every counter is `u64`: the type system makes a negative balance
/// unrepresentable, and the engine rejects (never clamps) any mutation that
/// would underflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    /// Gold on hand.
    pub gold: u64,
    /// Peasant population.
    pub population: u64,
    /// Elan (magic resource).
    pub mana: u64,
    /// Land in acres.
    pub land: u64,
}

/// A partial update to [`Resources`].
///
/// Merge rule (field-by-field): a `Some` field overwrites the stored value
/// wholesale; a `None` field leaves the stored value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcesPatch {
    /// New gold balance, if changed.
    pub gold: Option<u64>,
    /// New population, if changed.
    pub population: Option<u64>,
    /// New elan balance, if changed.
    pub mana: Option<u64>,
    /// New land total, if changed.
    pub land: Option<u64>,
}

impl Resources {
    /// Apply a partial update under the documented override rule.
    pub fn apply(&mut self, patch: ResourcesPatch) {
        if let Some(gold) = patch.gold {
            self.gold = gold;
        }
        if let Some(population) = patch.population {
            self.population = population;
        }
        if let Some(mana) = patch.mana {
            self.mana = mana;
        }
        if let Some(land) = patch.land {
            self.land = land;
        }
    }
}

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A territory's map cell.
///
/// Equality is exact structural equality on both components -- duplicate
/// claim detection compares cells, never geometric distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    /// East-west component, bounded to [-10000, 10000].
    pub x: i32,
    /// North-south component, bounded to [-10000, 10000].
    pub y: i32,
}

impl core::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Kingdom
// ---------------------------------------------------------------------------

/// The aggregate root of every action.
///
/// Owned and mutated exclusively through the resolution handlers; the
/// `version` field is the conditional-update token the store checks on every
/// write, so no two committed actions can share a stale resource snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kingdom {
    /// Unique identifier.
    pub id: KingdomId,
    /// Authenticated subject that owns this kingdom.
    pub owner_id: String,
    /// Owner display name at creation time.
    pub owner_name: String,
    /// The kingdom's race, selecting formula variants.
    pub race: Race,
    /// Resource counters.
    pub resources: Resources,
    /// Building counts per kind.
    pub buildings: BTreeMap<BuildingKind, u64>,
    /// Unit counts per kind.
    pub total_units: BTreeMap<UnitKind, u64>,
    /// Free-form race/achievement bookkeeping.
    pub stats: serde_json::Value,
    /// Conditional-update token; advances on every committed write.
    pub version: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A partial update to a [`Kingdom`].
///
/// Merge rule (field-by-field): a `Some` field overwrites the stored field
/// wholesale (`buildings`, `total_units`, and `stats` replace the whole
/// collection); a `None` field leaves the stored value untouched; the nested
/// `resources` patch merges field-by-field under [`Resources::apply`].
/// `version` and `updated_at` are advanced by the store on every successful
/// update, never by the patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KingdomPatch {
    /// Nested resource update.
    pub resources: Option<ResourcesPatch>,
    /// Replacement building counts.
    pub buildings: Option<BTreeMap<BuildingKind, u64>>,
    /// Replacement unit counts.
    pub total_units: Option<BTreeMap<UnitKind, u64>>,
    /// Replacement bookkeeping blob.
    pub stats: Option<serde_json::Value>,
}

impl Kingdom {
    /// Apply a partial update under the documented override rule.
    ///
    /// Does not touch `version` or `updated_at`; the store advances those
    /// as part of its conditional write.
    pub fn apply_patch(&mut self, patch: KingdomPatch) {
        if let Some(resources) = patch.resources {
            self.resources.apply(resources);
        }
        if let Some(buildings) = patch.buildings {
            self.buildings = buildings;
        }
        if let Some(total_units) = patch.total_units {
            self.total_units = total_units;
        }
        if let Some(stats) = patch.stats {
            self.stats = stats;
        }
    }

    /// Count of buildings of the given kind.
    pub fn building_count(&self, kind: BuildingKind) -> u64 {
        self.buildings.get(&kind).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Territory
// ---------------------------------------------------------------------------

/// A territory owned by exactly one kingdom.
///
/// Created only by a successful claim action; the engine has no removal
/// path. Within one kingdom no two territories share a coordinate cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    /// Unique identifier.
    pub id: TerritoryId,
    /// Owning kingdom.
    pub kingdom_id: KingdomId,
    /// Display name, 2--50 characters.
    pub name: String,
    /// Territory type.
    pub kind: TerritoryKind,
    /// Terrain type.
    pub terrain: TerrainKind,
    /// Map cell.
    pub coordinates: Coordinates,
    /// Local resource counters, independent of the kingdom's.
    pub resources: Resources,
    /// Local building counts.
    pub buildings: BTreeMap<BuildingKind, u64>,
    /// Defense level.
    pub defense_level: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Field bundle for creating a [`Territory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTerritory {
    /// Owning kingdom.
    pub kingdom_id: KingdomId,
    /// Display name, already validated.
    pub name: String,
    /// Territory type.
    pub kind: TerritoryKind,
    /// Terrain type.
    pub terrain: TerrainKind,
    /// Normalized map cell.
    pub coordinates: Coordinates,
}

// ---------------------------------------------------------------------------
// Unit stacks
// ---------------------------------------------------------------------------

/// A record of one training (summoning) event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStack {
    /// Unique identifier.
    pub id: UnitStackId,
    /// Owning kingdom.
    pub kingdom_id: KingdomId,
    /// The trained unit kind.
    pub kind: UnitKind,
    /// How many units the ritual yielded.
    pub quantity: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Field bundle for creating a [`UnitStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUnitStack {
    /// Owning kingdom.
    pub kingdom_id: KingdomId,
    /// The trained unit kind.
    pub kind: UnitKind,
    /// How many units the ritual yielded.
    pub quantity: u64,
}

// ---------------------------------------------------------------------------
// Spell effects
// ---------------------------------------------------------------------------

/// A record of one resolved cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellEffect {
    /// Unique identifier.
    pub id: SpellEffectId,
    /// Casting kingdom.
    pub kingdom_id: KingdomId,
    /// The spell that was cast.
    pub spell: Spell,
    /// Optional target territory.
    pub target_territory: Option<TerritoryId>,
    /// Whether the cast triggered backlash.
    pub backlash: bool,
    /// How many turns the effect lasts.
    pub duration_turns: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Field bundle for creating a [`SpellEffect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSpellEffect {
    /// Casting kingdom.
    pub kingdom_id: KingdomId,
    /// The spell that was cast.
    pub spell: Spell,
    /// Optional target territory.
    pub target_territory: Option<TerritoryId>,
    /// Whether the cast triggered backlash.
    pub backlash: bool,
    /// How many turns the effect lasts.
    pub duration_turns: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_kingdom() -> Kingdom {
        Kingdom {
            id: KingdomId::new(),
            owner_id: String::from("subject-1"),
            owner_name: String::from("Aldric"),
            race: Race::Human,
            resources: Resources {
                gold: 10_000,
                population: 2_000,
                mana: 50,
                land: 400,
            },
            buildings: BTreeMap::new(),
            total_units: BTreeMap::new(),
            stats: serde_json::Value::Null,
            version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn resource_patch_overrides_only_specified_fields() {
        let mut kingdom = sample_kingdom();
        kingdom.apply_patch(KingdomPatch {
            resources: Some(ResourcesPatch {
                gold: Some(9_500),
                ..ResourcesPatch::default()
            }),
            ..KingdomPatch::default()
        });

        assert_eq!(kingdom.resources.gold, 9_500);
        // Unspecified nested fields are untouched.
        assert_eq!(kingdom.resources.population, 2_000);
        assert_eq!(kingdom.resources.mana, 50);
        assert_eq!(kingdom.resources.land, 400);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut kingdom = sample_kingdom();
        let before = kingdom.clone();
        kingdom.apply_patch(KingdomPatch::default());
        assert_eq!(kingdom, before);
    }

    #[test]
    fn buildings_patch_replaces_whole_map() {
        let mut kingdom = sample_kingdom();
        kingdom.buildings.insert(BuildingKind::Quarry, 10);

        let mut replacement = BTreeMap::new();
        replacement.insert(BuildingKind::Temple, 3);
        kingdom.apply_patch(KingdomPatch {
            buildings: Some(replacement),
            ..KingdomPatch::default()
        });

        assert_eq!(kingdom.building_count(BuildingKind::Temple), 3);
        assert_eq!(kingdom.building_count(BuildingKind::Quarry), 0);
    }

    #[test]
    fn patch_does_not_advance_version() {
        let mut kingdom = sample_kingdom();
        kingdom.apply_patch(KingdomPatch {
            resources: Some(ResourcesPatch {
                gold: Some(1),
                ..ResourcesPatch::default()
            }),
            ..KingdomPatch::default()
        });
        assert_eq!(kingdom.version, 1);
    }

    #[test]
    fn coordinate_equality_is_structural() {
        let a = Coordinates { x: 3, y: -4 };
        let b = Coordinates { x: 3, y: -4 };
        let c = Coordinates { x: -4, y: 3 };
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "(3,-4)");
    }
}
