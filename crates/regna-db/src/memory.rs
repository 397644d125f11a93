//! In-memory store for tests and local development.
//!
//! Implements the same contract as the `PostgreSQL` store, including the
//! conditional-update semantics on the kingdom record, over plain maps
//! behind a [`tokio::sync::Mutex`]. Engine tests run against this backend
//! so they stay hermetic.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use regna_engine::store::{
    KingdomStore, SpellEffectStore, StoreError, TerritoryStore, UnitStackStore,
};
use regna_types::{
    Kingdom, KingdomId, KingdomPatch, NewSpellEffect, NewTerritory, NewUnitStack, Resources,
    SpellEffect, SpellEffectId, Territory, TerritoryId, UnitStack, UnitStackId,
};

#[derive(Debug, Default)]
struct Inner {
    kingdoms: BTreeMap<Uuid, Kingdom>,
    territories: BTreeMap<Uuid, Territory>,
    unit_stacks: BTreeMap<Uuid, UnitStack>,
    spell_effects: BTreeMap<Uuid, SpellEffect>,
}

/// An in-memory entity store with kingdom version CAS.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a kingdom (test/dev helper; production kingdoms come from the
    /// host's provisioning flow).
    pub async fn insert_kingdom(&self, kingdom: Kingdom) {
        let mut inner = self.inner.lock().await;
        inner.kingdoms.insert(kingdom.id.into_inner(), kingdom);
    }

    /// Number of territories currently stored for a kingdom.
    pub async fn territory_count(&self, kingdom_id: KingdomId) -> usize {
        let inner = self.inner.lock().await;
        inner
            .territories
            .values()
            .filter(|territory| territory.kingdom_id == kingdom_id)
            .count()
    }

    /// Number of unit stacks currently stored for a kingdom.
    pub async fn unit_stack_count(&self, kingdom_id: KingdomId) -> usize {
        let inner = self.inner.lock().await;
        inner
            .unit_stacks
            .values()
            .filter(|stack| stack.kingdom_id == kingdom_id)
            .count()
    }

    /// Number of spell effects currently stored for a kingdom.
    pub async fn spell_effect_count(&self, kingdom_id: KingdomId) -> usize {
        let inner = self.inner.lock().await;
        inner
            .spell_effects
            .values()
            .filter(|effect| effect.kingdom_id == kingdom_id)
            .count()
    }
}

impl KingdomStore for MemoryStore {
    async fn get_kingdom(&self, id: KingdomId) -> Result<Option<Kingdom>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.kingdoms.get(&id.into_inner()).cloned())
    }

    async fn update_kingdom(
        &self,
        id: KingdomId,
        expected_version: u64,
        patch: KingdomPatch,
    ) -> Result<Kingdom, StoreError> {
        let mut inner = self.inner.lock().await;
        let kingdom = inner
            .kingdoms
            .get_mut(&id.into_inner())
            .ok_or_else(|| StoreError::Backend(format!("kingdom {id} missing during update")))?;

        if kingdom.version != expected_version {
            return Err(StoreError::VersionConflict {
                entity: "kingdom",
                id: id.into_inner(),
            });
        }

        kingdom.apply_patch(patch);
        kingdom.version = kingdom.version.saturating_add(1);
        kingdom.updated_at = Utc::now();
        Ok(kingdom.clone())
    }
}

impl TerritoryStore for MemoryStore {
    async fn list_territories(&self, kingdom_id: KingdomId) -> Result<Vec<Territory>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .territories
            .values()
            .filter(|territory| territory.kingdom_id == kingdom_id)
            .cloned()
            .collect())
    }

    async fn create_territory(&self, fields: NewTerritory) -> Result<Territory, StoreError> {
        let mut inner = self.inner.lock().await;
        let territory = Territory {
            id: TerritoryId::new(),
            kingdom_id: fields.kingdom_id,
            name: fields.name,
            kind: fields.kind,
            terrain: fields.terrain,
            coordinates: fields.coordinates,
            resources: Resources::default(),
            buildings: BTreeMap::new(),
            defense_level: 0,
            created_at: Utc::now(),
        };
        inner
            .territories
            .insert(territory.id.into_inner(), territory.clone());
        Ok(territory)
    }
}

impl UnitStackStore for MemoryStore {
    async fn create_unit_stack(&self, fields: NewUnitStack) -> Result<UnitStack, StoreError> {
        let mut inner = self.inner.lock().await;
        let stack = UnitStack {
            id: UnitStackId::new(),
            kingdom_id: fields.kingdom_id,
            kind: fields.kind,
            quantity: fields.quantity,
            created_at: Utc::now(),
        };
        inner
            .unit_stacks
            .insert(stack.id.into_inner(), stack.clone());
        Ok(stack)
    }
}

impl SpellEffectStore for MemoryStore {
    async fn create_spell_effect(&self, fields: NewSpellEffect) -> Result<SpellEffect, StoreError> {
        let mut inner = self.inner.lock().await;
        let effect = SpellEffect {
            id: SpellEffectId::new(),
            kingdom_id: fields.kingdom_id,
            spell: fields.spell,
            target_territory: fields.target_territory,
            backlash: fields.backlash,
            duration_turns: fields.duration_turns,
            created_at: Utc::now(),
        };
        inner
            .spell_effects
            .insert(effect.id.into_inner(), effect.clone());
        Ok(effect)
    }
}
