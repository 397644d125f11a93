//! The persisted-entity collaborator contract.
//!
//! The engine does not implement storage; it consumes these traits and
//! treats every call as an opaque awaited operation. The one consistency
//! requirement is on [`KingdomStore::update_kingdom`]: the write must be
//! conditional on the caller's `expected_version` (compare-and-swap), so
//! that no two committed actions can be based on resource snapshots that
//! ignore each other. Backends live in `regna-db`.

use regna_types::{
    Kingdom, KingdomId, KingdomPatch, NewSpellEffect, NewTerritory, NewUnitStack, SpellEffect,
    Territory, UnitStack,
};
use uuid::Uuid;

/// Errors surfaced by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A conditional update found a different version than expected.
    /// The handler re-reads the aggregate and retries.
    #[error("version conflict updating {entity} {id}")]
    VersionConflict {
        /// The entity type whose update was rejected.
        entity: &'static str,
        /// The entity's identifier.
        id: Uuid,
    },

    /// Any other backend fault. The backend logs the raw cause before
    /// converting; the engine treats this as internal.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Access to the kingdom aggregate.
pub trait KingdomStore {
    /// Fetch a kingdom by id; `None` when absent.
    fn get_kingdom(
        &self,
        id: KingdomId,
    ) -> impl Future<Output = Result<Option<Kingdom>, StoreError>>;

    /// Conditionally apply a partial update.
    ///
    /// The write commits only if the stored version equals
    /// `expected_version`; on success the stored version advances and the
    /// updated kingdom is returned.
    fn update_kingdom(
        &self,
        id: KingdomId,
        expected_version: u64,
        patch: KingdomPatch,
    ) -> impl Future<Output = Result<Kingdom, StoreError>>;
}

/// Access to territories.
pub trait TerritoryStore {
    /// List every territory owned by a kingdom.
    fn list_territories(
        &self,
        kingdom_id: KingdomId,
    ) -> impl Future<Output = Result<Vec<Territory>, StoreError>>;

    /// Create a territory from the given field bundle.
    fn create_territory(
        &self,
        fields: NewTerritory,
    ) -> impl Future<Output = Result<Territory, StoreError>>;
}

/// Access to unit stacks.
pub trait UnitStackStore {
    /// Create a unit stack from the given field bundle.
    fn create_unit_stack(
        &self,
        fields: NewUnitStack,
    ) -> impl Future<Output = Result<UnitStack, StoreError>>;
}

/// Access to spell effects.
pub trait SpellEffectStore {
    /// Create a spell effect from the given field bundle.
    fn create_spell_effect(
        &self,
        fields: NewSpellEffect,
    ) -> impl Future<Output = Result<SpellEffect, StoreError>>;
}
