//! The claim-territory handler.
//!
//! A claim costs a flat 500 gold regardless of territory type and terrain.
//! The duplicate-coordinate check compares cells structurally (never
//! geometric distance) and runs before the gold deduction, so a rejected
//! claim spends nothing.

use regna_types::{
    ActionOutcome, ActionType, Caller, ClaimTerritoryRequest, KingdomPatch, NewTerritory,
    ResourceKind, ResourcesPatch,
};
use serde_json::json;

use regna_formulas::CLAIM_GOLD_COST;

use crate::error::EngineError;
use crate::store::{KingdomStore, StoreError, TerritoryStore};
use crate::validation;

use super::{MAX_COMMIT_ATTEMPTS, load_kingdom, outcome_from_error, retries_exhausted};

/// Claim a new territory for a kingdom.
pub async fn claim_territory<S>(
    store: &S,
    caller: &Caller,
    request: &ClaimTerritoryRequest,
) -> ActionOutcome
where
    S: KingdomStore + TerritoryStore,
{
    match resolve(store, caller, request).await {
        Ok(payload) => ActionOutcome::ok(payload),
        Err(error) => {
            outcome_from_error(ActionType::ClaimTerritory, request.kingdom_id, &error)
        }
    }
}

async fn resolve<S>(
    store: &S,
    caller: &Caller,
    request: &ClaimTerritoryRequest,
) -> Result<serde_json::Value, EngineError>
where
    S: KingdomStore + TerritoryStore,
{
    // Stage 1: validation, before any store read.
    let valid = validation::validate_claim(request)?;

    for attempt in 0..MAX_COMMIT_ATTEMPTS {
        // Stage 2: load the aggregate.
        let kingdom = load_kingdom(store, valid.kingdom_id).await?;

        // Stage 3: duplicate-coordinate conflict, before any deduction.
        let siblings = store.list_territories(valid.kingdom_id).await?;
        if siblings
            .iter()
            .any(|territory| territory.coordinates == valid.coordinates)
        {
            return Err(EngineError::InvalidParam {
                field: "coordinates",
                reason: format!("a territory already exists at {}", valid.coordinates),
            });
        }

        // Stage 4: sufficiency.
        let gold = kingdom.resources.gold;
        if gold < CLAIM_GOLD_COST {
            return Err(EngineError::InsufficientResources {
                resource: ResourceKind::Gold,
                required: CLAIM_GOLD_COST,
                current: gold,
            });
        }

        // Stage 5: conditional debit, then the child create.
        let patch = KingdomPatch {
            resources: Some(ResourcesPatch {
                gold: Some(gold.saturating_sub(CLAIM_GOLD_COST)),
                ..ResourcesPatch::default()
            }),
            ..KingdomPatch::default()
        };

        match store.update_kingdom(kingdom.id, kingdom.version, patch).await {
            Ok(updated) => {
                let territory = store
                    .create_territory(NewTerritory {
                        kingdom_id: kingdom.id,
                        name: valid.name.clone(),
                        kind: valid.kind,
                        terrain: valid.terrain,
                        coordinates: valid.coordinates,
                    })
                    .await
                    .map_err(|error| EngineError::Internal {
                        context: format!("territory creation failed after debit: {error}"),
                    })?;

                tracing::info!(
                    kingdom = %kingdom.id,
                    territory = %territory.id,
                    claimed_by = %caller.subject_id,
                    cell = %valid.coordinates,
                    "territory claimed"
                );

                let territory_json =
                    serde_json::to_value(&territory).map_err(|error| EngineError::Internal {
                        context: format!("territory payload serialization failed: {error}"),
                    })?;
                return Ok(json!({
                    "territory": territory_json,
                    "gold_spent": CLAIM_GOLD_COST,
                    "gold_remaining": updated.resources.gold,
                }));
            }
            Err(StoreError::VersionConflict { .. }) => {
                tracing::debug!(kingdom = %kingdom.id, attempt, "claim commit conflicted, retrying");
            }
            Err(other) => return Err(other.into()),
        }
    }

    Err(retries_exhausted(ActionType::ClaimTerritory))
}
