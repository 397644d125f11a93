//! `PostgreSQL` implementations of the engine's store contract.
//!
//! Entities persist as narrow rows with jsonb documents for the nested
//! counters. The kingdom row carries a `version` bigint; updates are
//! conditional on it (`WHERE id = $1 AND version = $2`), which gives the
//! engine the compare-and-swap semantics it needs to prevent lost updates
//! between concurrent actions on the same kingdom.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use regna_engine::store::{
    KingdomStore, SpellEffectStore, StoreError, TerritoryStore, UnitStackStore,
};
use regna_types::{
    BuildingKind, Coordinates, Kingdom, KingdomId, KingdomPatch, NewSpellEffect, NewTerritory,
    NewUnitStack, Race, Resources, Spell, SpellEffect, SpellEffectId, TerrainKind, Territory,
    TerritoryId, TerritoryKind, UnitKind, UnitStack, UnitStackId,
};

use crate::error::DbError;
use crate::postgres::PostgresPool;

/// Store over a `PostgreSQL` pool implementing every engine store trait.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Build a store over an established pool.
    pub fn new(pool: &PostgresPool) -> Self {
        Self {
            pool: pool.pool().clone(),
        }
    }
}

/// Log the raw cause and reduce it to the opaque backend failure the
/// engine's contract exposes.
fn backend(operation: &'static str, error: &DbError) -> StoreError {
    tracing::error!(operation, cause = %error, "store operation failed");
    StoreError::Backend(format!("{operation} failed"))
}

// ---------------------------------------------------------------------------
// Row types and conversions
// ---------------------------------------------------------------------------

#[derive(Debug, sqlx::FromRow)]
struct KingdomRow {
    id: Uuid,
    owner_id: String,
    owner_name: String,
    race: String,
    resources: serde_json::Value,
    buildings: serde_json::Value,
    total_units: serde_json::Value,
    stats: serde_json::Value,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl KingdomRow {
    fn into_kingdom(self) -> Result<Kingdom, DbError> {
        let race = Race::parse(&self.race)
            .ok_or_else(|| DbError::Corrupt(format!("unknown race {:?}", self.race)))?;
        let resources: Resources = serde_json::from_value(self.resources)?;
        let buildings: BTreeMap<BuildingKind, u64> = serde_json::from_value(self.buildings)?;
        let total_units: BTreeMap<UnitKind, u64> = serde_json::from_value(self.total_units)?;
        let version = u64::try_from(self.version)
            .map_err(|_| DbError::Corrupt(format!("negative version {}", self.version)))?;

        Ok(Kingdom {
            id: KingdomId::from(self.id),
            owner_id: self.owner_id,
            owner_name: self.owner_name,
            race,
            resources,
            buildings,
            total_units,
            stats: self.stats,
            version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TerritoryRow {
    id: Uuid,
    kingdom_id: Uuid,
    name: String,
    kind: String,
    terrain: String,
    x: i32,
    y: i32,
    resources: serde_json::Value,
    buildings: serde_json::Value,
    defense_level: i32,
    created_at: DateTime<Utc>,
}

impl TerritoryRow {
    fn into_territory(self) -> Result<Territory, DbError> {
        let kind = TerritoryKind::parse(&self.kind)
            .ok_or_else(|| DbError::Corrupt(format!("unknown territory kind {:?}", self.kind)))?;
        let terrain = TerrainKind::parse(&self.terrain)
            .ok_or_else(|| DbError::Corrupt(format!("unknown terrain {:?}", self.terrain)))?;
        let resources: Resources = serde_json::from_value(self.resources)?;
        let buildings: BTreeMap<BuildingKind, u64> = serde_json::from_value(self.buildings)?;
        let defense_level = u32::try_from(self.defense_level).map_err(|_| {
            DbError::Corrupt(format!("negative defense level {}", self.defense_level))
        })?;

        Ok(Territory {
            id: TerritoryId::from(self.id),
            kingdom_id: KingdomId::from(self.kingdom_id),
            name: self.name,
            kind,
            terrain,
            coordinates: Coordinates {
                x: self.x,
                y: self.y,
            },
            resources,
            buildings,
            defense_level,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UnitStackRow {
    id: Uuid,
    kingdom_id: Uuid,
    kind: String,
    quantity: i64,
    created_at: DateTime<Utc>,
}

impl UnitStackRow {
    fn into_unit_stack(self) -> Result<UnitStack, DbError> {
        let kind = UnitKind::parse(&self.kind)
            .ok_or_else(|| DbError::Corrupt(format!("unknown unit kind {:?}", self.kind)))?;
        let quantity = u64::try_from(self.quantity)
            .map_err(|_| DbError::Corrupt(format!("negative quantity {}", self.quantity)))?;

        Ok(UnitStack {
            id: UnitStackId::from(self.id),
            kingdom_id: KingdomId::from(self.kingdom_id),
            kind,
            quantity,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SpellEffectRow {
    id: Uuid,
    kingdom_id: Uuid,
    spell: String,
    target_territory: Option<Uuid>,
    backlash: bool,
    duration_turns: i32,
    created_at: DateTime<Utc>,
}

impl SpellEffectRow {
    fn into_spell_effect(self) -> Result<SpellEffect, DbError> {
        let spell = Spell::parse(&self.spell)
            .ok_or_else(|| DbError::Corrupt(format!("unknown spell {:?}", self.spell)))?;
        let duration_turns = u32::try_from(self.duration_turns).map_err(|_| {
            DbError::Corrupt(format!("negative duration {}", self.duration_turns))
        })?;

        Ok(SpellEffect {
            id: SpellEffectId::from(self.id),
            kingdom_id: KingdomId::from(self.kingdom_id),
            spell,
            target_territory: self.target_territory.map(TerritoryId::from),
            backlash: self.backlash,
            duration_turns,
            created_at: self.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Inner operations (DbError level)
// ---------------------------------------------------------------------------

const KINGDOM_COLUMNS: &str = "id, owner_id, owner_name, race, resources, buildings, \
     total_units, stats, version, created_at, updated_at";

const TERRITORY_COLUMNS: &str =
    "id, kingdom_id, name, kind, terrain, x, y, resources, buildings, defense_level, created_at";

impl PostgresStore {
    async fn fetch_kingdom(&self, id: KingdomId) -> Result<Option<Kingdom>, DbError> {
        let row = sqlx::query_as::<_, KingdomRow>(&format!(
            "SELECT {KINGDOM_COLUMNS} FROM kingdoms WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        row.map(KingdomRow::into_kingdom).transpose()
    }

    async fn conditional_update_kingdom(
        &self,
        id: KingdomId,
        expected_version: u64,
        patch: KingdomPatch,
    ) -> Result<Result<Kingdom, StoreError>, DbError> {
        // Read the current document, apply the merge in memory, then write
        // it back conditionally. If another writer slipped in between, the
        // version guard rejects the write and the engine retries.
        let Some(mut kingdom) = self.fetch_kingdom(id).await? else {
            return Ok(Err(StoreError::Backend(format!(
                "kingdom {id} missing during update"
            ))));
        };
        if kingdom.version != expected_version {
            return Ok(Err(StoreError::VersionConflict {
                entity: "kingdom",
                id: id.into_inner(),
            }));
        }
        kingdom.apply_patch(patch);

        let expected = i64::try_from(expected_version)
            .map_err(|_| DbError::Corrupt(format!("version {expected_version} exceeds bigint")))?;

        let row = sqlx::query_as::<_, KingdomRow>(&format!(
            "UPDATE kingdoms
             SET resources = $3, buildings = $4, total_units = $5, stats = $6,
                 version = version + 1, updated_at = NOW()
             WHERE id = $1 AND version = $2
             RETURNING {KINGDOM_COLUMNS}"
        ))
        .bind(id.into_inner())
        .bind(expected)
        .bind(serde_json::to_value(kingdom.resources)?)
        .bind(serde_json::to_value(&kingdom.buildings)?)
        .bind(serde_json::to_value(&kingdom.total_units)?)
        .bind(&kingdom.stats)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(updated) => {
                tracing::debug!(kingdom = %id, "kingdom updated");
                Ok(Ok(updated.into_kingdom()?))
            }
            // The guard rejected the write: someone else committed first.
            None => Ok(Err(StoreError::VersionConflict {
                entity: "kingdom",
                id: id.into_inner(),
            })),
        }
    }

    async fn fetch_territories(&self, kingdom_id: KingdomId) -> Result<Vec<Territory>, DbError> {
        let rows = sqlx::query_as::<_, TerritoryRow>(&format!(
            "SELECT {TERRITORY_COLUMNS} FROM territories WHERE kingdom_id = $1 ORDER BY created_at"
        ))
        .bind(kingdom_id.into_inner())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TerritoryRow::into_territory).collect()
    }

    async fn insert_territory(&self, fields: NewTerritory) -> Result<Territory, DbError> {
        let row = sqlx::query_as::<_, TerritoryRow>(&format!(
            "INSERT INTO territories
               (id, kingdom_id, name, kind, terrain, x, y, resources, buildings, defense_level)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0)
             RETURNING {TERRITORY_COLUMNS}"
        ))
        .bind(TerritoryId::new().into_inner())
        .bind(fields.kingdom_id.into_inner())
        .bind(&fields.name)
        .bind(fields.kind.name())
        .bind(fields.terrain.name())
        .bind(fields.coordinates.x)
        .bind(fields.coordinates.y)
        .bind(serde_json::to_value(Resources::default())?)
        .bind(serde_json::to_value(BTreeMap::<BuildingKind, u64>::new())?)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(kingdom = %fields.kingdom_id, cell = %fields.coordinates, "territory created");
        row.into_territory()
    }

    async fn insert_unit_stack(&self, fields: NewUnitStack) -> Result<UnitStack, DbError> {
        let quantity = i64::try_from(fields.quantity)
            .map_err(|_| DbError::Corrupt(format!("quantity {} exceeds bigint", fields.quantity)))?;

        let row = sqlx::query_as::<_, UnitStackRow>(
            "INSERT INTO unit_stacks (id, kingdom_id, kind, quantity)
             VALUES ($1, $2, $3, $4)
             RETURNING id, kingdom_id, kind, quantity, created_at",
        )
        .bind(UnitStackId::new().into_inner())
        .bind(fields.kingdom_id.into_inner())
        .bind(fields.kind.name())
        .bind(quantity)
        .fetch_one(&self.pool)
        .await?;

        row.into_unit_stack()
    }

    async fn insert_spell_effect(&self, fields: NewSpellEffect) -> Result<SpellEffect, DbError> {
        let duration = i32::try_from(fields.duration_turns).map_err(|_| {
            DbError::Corrupt(format!("duration {} exceeds integer", fields.duration_turns))
        })?;

        let row = sqlx::query_as::<_, SpellEffectRow>(
            "INSERT INTO spell_effects
               (id, kingdom_id, spell, target_territory, backlash, duration_turns)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, kingdom_id, spell, target_territory, backlash, duration_turns, created_at",
        )
        .bind(SpellEffectId::new().into_inner())
        .bind(fields.kingdom_id.into_inner())
        .bind(fields.spell.name())
        .bind(fields.target_territory.map(TerritoryId::into_inner))
        .bind(fields.backlash)
        .bind(duration)
        .fetch_one(&self.pool)
        .await?;

        row.into_spell_effect()
    }
}

// ---------------------------------------------------------------------------
// Engine trait implementations
// ---------------------------------------------------------------------------

impl KingdomStore for PostgresStore {
    async fn get_kingdom(&self, id: KingdomId) -> Result<Option<Kingdom>, StoreError> {
        self.fetch_kingdom(id)
            .await
            .map_err(|e| backend("get_kingdom", &e))
    }

    async fn update_kingdom(
        &self,
        id: KingdomId,
        expected_version: u64,
        patch: KingdomPatch,
    ) -> Result<Kingdom, StoreError> {
        self.conditional_update_kingdom(id, expected_version, patch)
            .await
            .map_err(|e| backend("update_kingdom", &e))?
    }
}

impl TerritoryStore for PostgresStore {
    async fn list_territories(&self, kingdom_id: KingdomId) -> Result<Vec<Territory>, StoreError> {
        self.fetch_territories(kingdom_id)
            .await
            .map_err(|e| backend("list_territories", &e))
    }

    async fn create_territory(&self, fields: NewTerritory) -> Result<Territory, StoreError> {
        self.insert_territory(fields)
            .await
            .map_err(|e| backend("create_territory", &e))
    }
}

impl UnitStackStore for PostgresStore {
    async fn create_unit_stack(&self, fields: NewUnitStack) -> Result<UnitStack, StoreError> {
        self.insert_unit_stack(fields)
            .await
            .map_err(|e| backend("create_unit_stack", &e))
    }
}

impl SpellEffectStore for PostgresStore {
    async fn create_spell_effect(&self, fields: NewSpellEffect) -> Result<SpellEffect, StoreError> {
        self.insert_spell_effect(fields)
            .await
            .map_err(|e| backend("create_spell_effect", &e))
    }
}
