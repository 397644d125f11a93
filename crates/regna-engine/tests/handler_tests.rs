//! Integration tests for the resolution handlers over the in-memory store.
//!
//! These exercise the full five-stage pipeline: validation ordering, the
//! duplicate-coordinate conflict check, sufficiency reporting, the
//! conditional-commit retry loop, and child-entity creation.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::Mutex;

use regna_db::MemoryStore;
use regna_engine::store::{
    KingdomStore, SpellEffectStore, StoreError, TerritoryStore, UnitStackStore,
};
use regna_engine::{
    MAX_COMMIT_ATTEMPTS, cast_spell, claim_territory, construct_building, generate_resources,
    train_units,
};
use regna_types::{
    BuildingKind, Caller, CastSpellRequest, ClaimTerritoryRequest, ConstructBuildingRequest,
    CoordinateInput, Coordinates, ErrorCode, GenerateResourcesRequest, Kingdom, KingdomId,
    KingdomPatch, NewSpellEffect, NewTerritory, NewUnitStack, Race, Resources, SpellEffect,
    Territory, TrainUnitsRequest, UnitStack,
};

fn caller() -> Caller {
    Caller {
        subject_id: String::from("subject-1"),
        display_name: String::from("Aldric"),
    }
}

fn kingdom(race: Race, resources: Resources) -> Kingdom {
    Kingdom {
        id: KingdomId::new(),
        owner_id: String::from("subject-1"),
        owner_name: String::from("Aldric"),
        race,
        resources,
        buildings: BTreeMap::new(),
        total_units: BTreeMap::new(),
        stats: serde_json::Value::Null,
        version: 1,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn claim_request(kingdom_id: KingdomId, name: &str, x: i32, y: i32) -> ClaimTerritoryRequest {
    ClaimTerritoryRequest {
        kingdom_id: Some(kingdom_id),
        name: Some(String::from(name)),
        territory_type: None,
        terrain_type: None,
        coordinates: Some(CoordinateInput::Pair { x, y }),
    }
}

// ---------------------------------------------------------------------------
// Claim territory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn claim_succeeds_and_debits_exactly_500_gold() {
    let store = MemoryStore::new();
    let k = kingdom(
        Race::Human,
        Resources {
            gold: 10_000,
            population: 500,
            mana: 0,
            land: 100,
        },
    );
    let id = k.id;
    store.insert_kingdom(k).await;

    let outcome = claim_territory(&store, &caller(), &claim_request(id, "Northwatch", 3, -4)).await;

    assert!(outcome.success, "claim failed: {:?}", outcome.error);
    let updated = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(updated.map(|k| k.resources.gold), Some(9_500));
    assert_eq!(store.territory_count(id).await, 1);

    let territories = store.list_territories(id).await.unwrap_or_default();
    let created = territories.first();
    assert_eq!(created.map(|t| t.name.as_str()), Some("Northwatch"));
    assert_eq!(
        created.map(|t| t.coordinates),
        Some(Coordinates { x: 3, y: -4 })
    );
}

#[tokio::test]
async fn claim_with_insufficient_gold_creates_nothing() {
    let store = MemoryStore::new();
    let k = kingdom(
        Race::Human,
        Resources {
            gold: 499,
            population: 500,
            mana: 0,
            land: 100,
        },
    );
    let id = k.id;
    store.insert_kingdom(k).await;

    let outcome = claim_territory(&store, &caller(), &claim_request(id, "Northwatch", 0, 0)).await;

    assert!(!outcome.success);
    assert_eq!(outcome.error_code, Some(ErrorCode::InsufficientResources));
    // The failure reports both the required and the current amount.
    let message = outcome.error.unwrap_or_default();
    assert!(message.contains("500"), "message was {message:?}");
    assert!(message.contains("499"), "message was {message:?}");

    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.map(|k| k.resources.gold), Some(499));
    assert_eq!(store.territory_count(id).await, 0);
}

#[tokio::test]
async fn claim_at_occupied_cell_spends_nothing() {
    let store = MemoryStore::new();
    let k = kingdom(
        Race::Human,
        Resources {
            gold: 10_000,
            population: 500,
            mana: 0,
            land: 100,
        },
    );
    let id = k.id;
    store.insert_kingdom(k).await;

    let first = claim_territory(&store, &caller(), &claim_request(id, "Northwatch", 5, 5)).await;
    assert!(first.success);

    let second = claim_territory(&store, &caller(), &claim_request(id, "Southwatch", 5, 5)).await;
    assert!(!second.success);
    assert_eq!(second.error_code, Some(ErrorCode::InvalidParam));

    // Only the first claim's gold was spent, and only one territory exists.
    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.map(|k| k.resources.gold), Some(9_500));
    assert_eq!(store.territory_count(id).await, 1);
}

#[tokio::test]
async fn claim_name_bounds_reject_before_any_store_read() {
    // The store is empty: if the handler read it before validating, the
    // outcome would be NOT_FOUND. A bad name must win instead.
    let store = MemoryStore::new();
    let request = claim_request(KingdomId::new(), "N", 0, 0);
    let outcome = claim_territory(&store, &caller(), &request).await;
    assert_eq!(outcome.error_code, Some(ErrorCode::InvalidParam));

    let long_name = "x".repeat(51);
    let request = claim_request(KingdomId::new(), &long_name, 0, 0);
    let outcome = claim_territory(&store, &caller(), &request).await;
    assert_eq!(outcome.error_code, Some(ErrorCode::InvalidParam));
}

#[tokio::test]
async fn claim_against_missing_kingdom_is_not_found() {
    let store = MemoryStore::new();
    let outcome =
        claim_territory(&store, &caller(), &claim_request(KingdomId::new(), "Northwatch", 0, 0))
            .await;
    assert!(!outcome.success);
    assert_eq!(outcome.error_code, Some(ErrorCode::NotFound));
}

#[tokio::test]
async fn claim_missing_params_rejected() {
    let store = MemoryStore::new();
    let outcome =
        claim_territory(&store, &caller(), &ClaimTerritoryRequest::default()).await;
    assert_eq!(outcome.error_code, Some(ErrorCode::MissingParams));
}

#[tokio::test]
async fn claim_encoded_coordinates_normalize_like_the_pair_form() {
    let store = MemoryStore::new();
    let k = kingdom(
        Race::Human,
        Resources {
            gold: 10_000,
            population: 500,
            mana: 0,
            land: 100,
        },
    );
    let id = k.id;
    store.insert_kingdom(k).await;

    let mut request = claim_request(id, "Northwatch", 0, 0);
    request.coordinates = Some(CoordinateInput::Encoded(String::from("12,-34")));
    let outcome = claim_territory(&store, &caller(), &request).await;
    assert!(outcome.success);

    let territories = store.list_territories(id).await.unwrap_or_default();
    assert_eq!(
        territories.first().map(|t| t.coordinates),
        Some(Coordinates { x: 12, y: -34 })
    );

    // The same cell submitted as a structured pair now conflicts.
    let mut duplicate = claim_request(id, "Southwatch", 12, -34);
    duplicate.coordinates = Some(CoordinateInput::Pair { x: 12, y: -34 });
    let outcome = claim_territory(&store, &caller(), &duplicate).await;
    assert_eq!(outcome.error_code, Some(ErrorCode::InvalidParam));
}

#[tokio::test]
async fn claim_defaults_are_observable_in_the_created_entity() {
    let store = MemoryStore::new();
    let k = kingdom(
        Race::Human,
        Resources {
            gold: 1_000,
            population: 500,
            mana: 0,
            land: 100,
        },
    );
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = ClaimTerritoryRequest {
        kingdom_id: Some(id),
        name: Some(String::from("Northwatch")),
        territory_type: None,
        terrain_type: None,
        coordinates: Some(CoordinateInput::Pair { x: 1, y: 1 }),
    };
    let outcome = claim_territory(&store, &caller(), &request).await;
    assert!(outcome.success);

    let territories = store.list_territories(id).await.unwrap_or_default();
    let created = territories.first();
    assert_eq!(
        created.map(|t| t.kind),
        Some(regna_types::TerritoryKind::Settlement)
    );
    assert_eq!(
        created.map(|t| t.terrain),
        Some(regna_types::TerrainKind::Plains)
    );
}

// ---------------------------------------------------------------------------
// Commit retry behavior
// ---------------------------------------------------------------------------

/// Wrapper that fails the first `conflicts` conditional updates with a
/// version conflict, then delegates. Exercises the handler retry loop.
struct ConflictingStore {
    inner: MemoryStore,
    conflicts_remaining: Mutex<u32>,
}

impl ConflictingStore {
    fn new(inner: MemoryStore, conflicts: u32) -> Self {
        Self {
            inner,
            conflicts_remaining: Mutex::new(conflicts),
        }
    }
}

impl KingdomStore for ConflictingStore {
    async fn get_kingdom(&self, id: KingdomId) -> Result<Option<Kingdom>, StoreError> {
        self.inner.get_kingdom(id).await
    }

    async fn update_kingdom(
        &self,
        id: KingdomId,
        expected_version: u64,
        patch: KingdomPatch,
    ) -> Result<Kingdom, StoreError> {
        let mut remaining = self.conflicts_remaining.lock().await;
        if *remaining > 0 {
            *remaining = remaining.saturating_sub(1);
            return Err(StoreError::VersionConflict {
                entity: "kingdom",
                id: id.into_inner(),
            });
        }
        drop(remaining);
        self.inner.update_kingdom(id, expected_version, patch).await
    }
}

impl TerritoryStore for ConflictingStore {
    async fn list_territories(&self, kingdom_id: KingdomId) -> Result<Vec<Territory>, StoreError> {
        self.inner.list_territories(kingdom_id).await
    }

    async fn create_territory(&self, fields: NewTerritory) -> Result<Territory, StoreError> {
        self.inner.create_territory(fields).await
    }
}

impl UnitStackStore for ConflictingStore {
    async fn create_unit_stack(&self, fields: NewUnitStack) -> Result<UnitStack, StoreError> {
        self.inner.create_unit_stack(fields).await
    }
}

impl SpellEffectStore for ConflictingStore {
    async fn create_spell_effect(&self, fields: NewSpellEffect) -> Result<SpellEffect, StoreError> {
        self.inner.create_spell_effect(fields).await
    }
}

#[tokio::test]
async fn claim_retries_through_version_conflicts() {
    let inner = MemoryStore::new();
    let k = kingdom(
        Race::Human,
        Resources {
            gold: 1_000,
            population: 0,
            mana: 0,
            land: 100,
        },
    );
    let id = k.id;
    inner.insert_kingdom(k).await;

    // One fewer conflict than the retry budget: the claim must land.
    let store = ConflictingStore::new(inner, MAX_COMMIT_ATTEMPTS.saturating_sub(1));
    let outcome = claim_territory(&store, &caller(), &claim_request(id, "Northwatch", 2, 2)).await;
    assert!(outcome.success);

    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.map(|k| k.resources.gold), Some(500));
    assert_eq!(store.inner.territory_count(id).await, 1);
}

#[tokio::test]
async fn exhausted_conflict_retries_become_internal_error() {
    let inner = MemoryStore::new();
    let k = kingdom(
        Race::Human,
        Resources {
            gold: 1_000,
            population: 0,
            mana: 0,
            land: 100,
        },
    );
    let id = k.id;
    inner.insert_kingdom(k).await;

    let store = ConflictingStore::new(inner, MAX_COMMIT_ATTEMPTS);
    let outcome = claim_territory(&store, &caller(), &claim_request(id, "Northwatch", 2, 2)).await;
    assert!(!outcome.success);
    assert_eq!(outcome.error_code, Some(ErrorCode::InternalError));
    // Internal causes are never exposed to the caller.
    assert_eq!(outcome.error.as_deref(), Some("an internal error occurred"));
    assert_eq!(store.inner.territory_count(id).await, 0);
}

// ---------------------------------------------------------------------------
// Construct building
// ---------------------------------------------------------------------------

#[tokio::test]
async fn construct_reports_brt_turns_and_waste() {
    let store = MemoryStore::new();
    let mut k = kingdom(
        Race::Human,
        Resources {
            gold: 100_000,
            population: 500,
            mana: 0,
            land: 400,
        },
    );
    // 20 quarries on 400 acres = 5% -> BRT 6.
    k.buildings.insert(BuildingKind::Quarry, 20);
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = ConstructBuildingRequest {
        kingdom_id: Some(id),
        building: Some(String::from("cottage")),
        count: Some(8),
    };
    let outcome = construct_building(&store, &caller(), &request).await;
    assert!(outcome.success, "construct failed: {:?}", outcome.error);

    let payload = outcome.payload.unwrap_or_default();
    assert_eq!(payload.pointer("/build_rate_turns"), Some(&serde_json::json!(6)));
    // ceil(8 / 6) = 2 turns, wasting 4 slots.
    assert_eq!(payload.pointer("/turns"), Some(&serde_json::json!(2)));
    let warning = payload
        .pointer("/efficiency_warning")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    assert!(warning.contains('4'), "warning was {warning:?}");

    // 8 cottages at 150 gold each.
    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.as_ref().map(|k| k.resources.gold), Some(98_800));
    assert_eq!(
        after.map(|k| k.building_count(BuildingKind::Cottage)),
        Some(8)
    );
}

#[tokio::test]
async fn construct_exact_fill_has_no_warning() {
    let store = MemoryStore::new();
    let k = kingdom(
        Race::Human,
        Resources {
            gold: 100_000,
            population: 500,
            mana: 0,
            land: 400,
        },
    );
    let id = k.id;
    store.insert_kingdom(k).await;

    // No quarries -> BRT 4; 8 structures fill two turns exactly.
    let request = ConstructBuildingRequest {
        kingdom_id: Some(id),
        building: Some(String::from("quarry")),
        count: Some(8),
    };
    let outcome = construct_building(&store, &caller(), &request).await;
    assert!(outcome.success);
    let payload = outcome.payload.unwrap_or_default();
    assert_eq!(
        payload.pointer("/efficiency_warning"),
        Some(&serde_json::Value::Null)
    );
}

#[tokio::test]
async fn construct_insufficient_gold_reports_amounts() {
    let store = MemoryStore::new();
    let k = kingdom(
        Race::Human,
        Resources {
            gold: 100,
            population: 500,
            mana: 0,
            land: 400,
        },
    );
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = ConstructBuildingRequest {
        kingdom_id: Some(id),
        building: Some(String::from("citadel")),
        count: Some(2),
    };
    let outcome = construct_building(&store, &caller(), &request).await;
    assert_eq!(outcome.error_code, Some(ErrorCode::InsufficientResources));
    let message = outcome.error.unwrap_or_default();
    assert!(message.contains("1200"), "message was {message:?}");
    assert!(message.contains("100"), "message was {message:?}");

    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.map(|k| k.building_count(BuildingKind::Citadel)), Some(0));
}

#[tokio::test]
async fn construct_unknown_building_rejected() {
    let store = MemoryStore::new();
    let request = ConstructBuildingRequest {
        kingdom_id: Some(KingdomId::new()),
        building: Some(String::from("ziggurat")),
        count: Some(1),
    };
    let outcome = construct_building(&store, &caller(), &request).await;
    assert_eq!(outcome.error_code, Some(ErrorCode::InvalidParam));
}

// ---------------------------------------------------------------------------
// Train units
// ---------------------------------------------------------------------------

#[tokio::test]
async fn train_summons_race_yield_and_drafts_population() {
    let store = MemoryStore::new();
    let k = kingdom(
        Race::Sidhe,
        Resources {
            gold: 100_000,
            population: 2_000,
            mana: 0,
            land: 10_000,
        },
    );
    let id = k.id;
    store.insert_kingdom(k).await;

    // Sidhe at 3.04% of 10,000 acres = 304 troops.
    let request = TrainUnitsRequest {
        kingdom_id: Some(id),
        unit: None,
    };
    let outcome = train_units(&store, &caller(), &request).await;
    assert!(outcome.success, "train failed: {:?}", outcome.error);

    let payload = outcome.payload.unwrap_or_default();
    assert_eq!(payload.pointer("/quantity"), Some(&serde_json::json!(304)));
    assert_eq!(payload.pointer("/unit"), Some(&serde_json::json!("infantry")));

    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.as_ref().map(|k| k.resources.population), Some(1_696));
    // 304 infantry at 50 gold each.
    assert_eq!(after.as_ref().map(|k| k.resources.gold), Some(84_800));
    assert_eq!(
        after.map(|k| {
            k.total_units
                .get(&regna_types::UnitKind::Infantry)
                .copied()
                .unwrap_or(0)
        }),
        Some(304)
    );
    assert_eq!(store.unit_stack_count(id).await, 1);
}

#[tokio::test]
async fn train_without_enough_population_is_rejected() {
    let store = MemoryStore::new();
    let k = kingdom(
        Race::Sidhe,
        Resources {
            gold: 100_000,
            population: 100, // 304 troops would be summoned
            mana: 0,
            land: 10_000,
        },
    );
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = TrainUnitsRequest {
        kingdom_id: Some(id),
        unit: None,
    };
    let outcome = train_units(&store, &caller(), &request).await;
    assert_eq!(outcome.error_code, Some(ErrorCode::InsufficientResources));

    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.map(|k| k.resources.population), Some(100));
    assert_eq!(store.unit_stack_count(id).await, 0);
}

#[tokio::test]
async fn train_with_no_land_reports_land_shortage() {
    let store = MemoryStore::new();
    let k = kingdom(
        Race::Human,
        Resources {
            gold: 100_000,
            population: 2_000,
            mana: 0,
            land: 10, // 2% of 10 truncates to 0 troops
        },
    );
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = TrainUnitsRequest {
        kingdom_id: Some(id),
        unit: None,
    };
    let outcome = train_units(&store, &caller(), &request).await;
    assert_eq!(outcome.error_code, Some(ErrorCode::InsufficientResources));
    // Human needs 50 acres for the first troop at 2.00%.
    let message = outcome.error.unwrap_or_default();
    assert!(message.contains("50"), "message was {message:?}");
}

// ---------------------------------------------------------------------------
// Cast spell
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cast_with_temple_support_spends_elan_without_backlash() {
    let store = MemoryStore::new();
    let mut k = kingdom(
        Race::Sidhe,
        Resources {
            gold: 0,
            population: 0,
            mana: 100,
            land: 100,
        },
    );
    k.buildings.insert(BuildingKind::Temple, 10);
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = CastSpellRequest {
        kingdom_id: Some(id),
        spell: Some(String::from("fertile_lands")),
        target_territory: None,
    };
    let outcome = cast_spell(&store, &caller(), &request).await;
    assert!(outcome.success, "cast failed: {:?}", outcome.error);

    let payload = outcome.payload.unwrap_or_default();
    assert_eq!(payload.pointer("/backlash"), Some(&serde_json::Value::Null));
    assert_eq!(payload.pointer("/elan_spent"), Some(&serde_json::json!(30)));
    assert_eq!(
        payload.pointer("/elan_remaining"),
        Some(&serde_json::json!(70))
    );

    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.as_ref().map(|k| k.resources.mana), Some(70));
    assert_eq!(
        after.map(|k| k.building_count(BuildingKind::Temple)),
        Some(10)
    );
    assert_eq!(store.spell_effect_count(id).await, 1);
}

#[tokio::test]
async fn cast_without_enough_elan_is_rejected_without_backlash() {
    let store = MemoryStore::new();
    let mut k = kingdom(
        Race::Human,
        Resources {
            gold: 0,
            population: 0,
            mana: 20,
            land: 100,
        },
    );
    k.buildings.insert(BuildingKind::Temple, 10);
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = CastSpellRequest {
        kingdom_id: Some(id),
        spell: Some(String::from("arcane_ward")), // costs 45
        target_territory: None,
    };
    let outcome = cast_spell(&store, &caller(), &request).await;
    assert_eq!(outcome.error_code, Some(ErrorCode::InsufficientResources));
    let message = outcome.error.unwrap_or_default();
    assert!(message.contains("45"), "message was {message:?}");
    assert!(message.contains("20"), "message was {message:?}");

    // No side effects: elan and temples untouched, no effect recorded.
    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.as_ref().map(|k| k.resources.mana), Some(20));
    assert_eq!(
        after.map(|k| k.building_count(BuildingKind::Temple)),
        Some(10)
    );
    assert_eq!(store.spell_effect_count(id).await, 0);
}

#[tokio::test]
async fn cast_beyond_temple_support_triggers_backlash() {
    let store = MemoryStore::new();
    let mut k = kingdom(
        Race::Human,
        Resources {
            gold: 0,
            population: 0,
            mana: 200,
            land: 100,
        },
    );
    // Tempest needs 6 temples; 50 temples would be safe, 5 are not.
    // Use 50 mana-capacity-wise: 5 temples cap = 50.
    k.buildings.insert(BuildingKind::Temple, 5);
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = CastSpellRequest {
        kingdom_id: Some(id),
        spell: Some(String::from("tempest")), // costs 60, needs 6 temples
        target_territory: None,
    };
    let outcome = cast_spell(&store, &caller(), &request).await;
    assert!(outcome.success, "cast failed: {:?}", outcome.error);

    let payload = outcome.payload.unwrap_or_default();
    let backlash = payload.pointer("/backlash").cloned().unwrap_or_default();
    assert_ne!(backlash, serde_json::Value::Null);
    // floor(5 * 0.12) = 0 temples destroyed, 0 elan lost, 2 turns.
    assert_eq!(backlash.pointer("/temples_destroyed"), Some(&serde_json::json!(0)));
    assert_eq!(backlash.pointer("/turns_cost"), Some(&serde_json::json!(2)));

    let effects = store.spell_effect_count(id).await;
    assert_eq!(effects, 1);

    // Elan: 200 - 60 = 140, clamped to the 5-temple cap of 50.
    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.map(|k| k.resources.mana), Some(50));
}

#[tokio::test]
async fn cast_backlash_destroys_temples_at_scale() {
    let store = MemoryStore::new();
    let mut k = kingdom(
        Race::Lich,
        Resources {
            gold: 0,
            population: 0,
            mana: 500,
            land: 100,
        },
    );
    // Riftgate needs 10 temples; 8 is short, and Lich backlash runs at 15%.
    k.buildings.insert(BuildingKind::Temple, 8);
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = CastSpellRequest {
        kingdom_id: Some(id),
        spell: Some(String::from("riftgate")), // costs 120, needs 10 temples
        target_territory: None,
    };
    let outcome = cast_spell(&store, &caller(), &request).await;
    assert!(outcome.success);

    let payload = outcome.payload.unwrap_or_default();
    let backlash = payload.pointer("/backlash").cloned().unwrap_or_default();
    // floor(8 * 0.15) = 1 temple destroyed, 2 elan lost.
    assert_eq!(backlash.pointer("/temples_destroyed"), Some(&serde_json::json!(1)));
    assert_eq!(backlash.pointer("/elan_lost"), Some(&serde_json::json!(2)));

    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(
        after.as_ref().map(|k| k.building_count(BuildingKind::Temple)),
        Some(7)
    );
    // 500 - 120 = 380, clamped to the 7-temple Lich cap: 7 * 10 * 1.4 = 98.
    assert_eq!(after.map(|k| k.resources.mana), Some(98));
}

#[tokio::test]
async fn cast_at_foreign_territory_rejected() {
    let store = MemoryStore::new();
    let mut k = kingdom(
        Race::Human,
        Resources {
            gold: 0,
            population: 0,
            mana: 100,
            land: 100,
        },
    );
    k.buildings.insert(BuildingKind::Temple, 5);
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = CastSpellRequest {
        kingdom_id: Some(id),
        spell: Some(String::from("clairvoyance")),
        target_territory: Some(regna_types::TerritoryId::new()),
    };
    let outcome = cast_spell(&store, &caller(), &request).await;
    assert_eq!(outcome.error_code, Some(ErrorCode::InvalidParam));
    assert_eq!(store.spell_effect_count(id).await, 0);
}

// ---------------------------------------------------------------------------
// Generate resources
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_accumulates_gold_population_and_elan() {
    let store = MemoryStore::new();
    let mut k = kingdom(
        Race::Human,
        Resources {
            gold: 0,
            population: 100,
            mana: 0,
            land: 100,
        },
    );
    k.buildings.insert(BuildingKind::Guildhall, 2);
    k.buildings.insert(BuildingKind::Cottage, 1);
    k.buildings.insert(BuildingKind::Temple, 400);
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = GenerateResourcesRequest {
        kingdom_id: Some(id),
        turns: Some(2),
    };
    let outcome = generate_resources(&store, &caller(), &request).await;
    assert!(outcome.success, "generate failed: {:?}", outcome.error);

    // Turn 1: gold += 100*2 + 2*60 = 320; pop 100 -> 125; mana += ceil(400*0.003) = 2.
    // Turn 2: gold += 125*2 + 120 = 370; pop 125 -> 150; mana += 2.
    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.as_ref().map(|k| k.resources.gold), Some(690));
    assert_eq!(after.as_ref().map(|k| k.resources.population), Some(150));
    assert_eq!(after.map(|k| k.resources.mana), Some(4));

    let payload = outcome.payload.unwrap_or_default();
    assert_eq!(payload.pointer("/gold_gained"), Some(&serde_json::json!(690)));
    assert_eq!(
        payload.pointer("/population_gained"),
        Some(&serde_json::json!(50))
    );
}

#[tokio::test]
async fn generate_caps_elan_at_racial_maximum() {
    let store = MemoryStore::new();
    let mut k = kingdom(
        Race::Human,
        Resources {
            gold: 0,
            population: 0,
            mana: 18,
            land: 100,
        },
    );
    // 2 temples: cap = 20, generation = ceil(2 * 0.003) = 1 per turn.
    k.buildings.insert(BuildingKind::Temple, 2);
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = GenerateResourcesRequest {
        kingdom_id: Some(id),
        turns: Some(10),
    };
    let outcome = generate_resources(&store, &caller(), &request).await;
    assert!(outcome.success);

    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.map(|k| k.resources.mana), Some(20));
}

#[tokio::test]
async fn generate_turn_bounds_enforced() {
    let store = MemoryStore::new();
    let request = GenerateResourcesRequest {
        kingdom_id: Some(KingdomId::new()),
        turns: Some(0),
    };
    let outcome = generate_resources(&store, &caller(), &request).await;
    assert_eq!(outcome.error_code, Some(ErrorCode::InvalidParam));

    let request = GenerateResourcesRequest {
        kingdom_id: Some(KingdomId::new()),
        turns: None,
    };
    let outcome = generate_resources(&store, &caller(), &request).await;
    assert_eq!(outcome.error_code, Some(ErrorCode::MissingParams));
}

#[tokio::test]
async fn generate_respects_population_land_cap() {
    let store = MemoryStore::new();
    let mut k = kingdom(
        Race::Human,
        Resources {
            gold: 0,
            population: 240,
            mana: 0,
            land: 10, // cap = 250
        },
    );
    k.buildings.insert(BuildingKind::Cottage, 4); // +100/turn uncapped
    let id = k.id;
    store.insert_kingdom(k).await;

    let request = GenerateResourcesRequest {
        kingdom_id: Some(id),
        turns: Some(3),
    };
    let outcome = generate_resources(&store, &caller(), &request).await;
    assert!(outcome.success);

    let after = store.get_kingdom(id).await.ok().flatten();
    assert_eq!(after.map(|k| k.resources.population), Some(250));
}
