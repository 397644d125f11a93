//! The train-units handler.
//!
//! Training is a summoning ritual: the yield is a race-specific fraction of
//! the kingdom's total land, troops are equipped with gold at the per-kind
//! price, and every trained troop is drafted from the peasant population.

use regna_types::{
    ActionOutcome, ActionType, Caller, KingdomPatch, NewUnitStack, ResourceKind, ResourcesPatch,
    TrainUnitsRequest,
};
use serde_json::json;

use regna_formulas::{races, summon_troops, unit_gold_cost};

use crate::error::EngineError;
use crate::store::{KingdomStore, StoreError, UnitStackStore};
use crate::validation;

use super::{MAX_COMMIT_ATTEMPTS, load_kingdom, outcome_from_error, retries_exhausted};

/// Train (summon) units for a kingdom.
pub async fn train_units<S>(
    store: &S,
    caller: &Caller,
    request: &TrainUnitsRequest,
) -> ActionOutcome
where
    S: KingdomStore + UnitStackStore,
{
    match resolve(store, caller, request).await {
        Ok(payload) => ActionOutcome::ok(payload),
        Err(error) => outcome_from_error(ActionType::TrainUnits, request.kingdom_id, &error),
    }
}

async fn resolve<S>(
    store: &S,
    caller: &Caller,
    request: &TrainUnitsRequest,
) -> Result<serde_json::Value, EngineError>
where
    S: KingdomStore + UnitStackStore,
{
    let valid = validation::validate_train(request)?;

    for attempt in 0..MAX_COMMIT_ATTEMPTS {
        let kingdom = load_kingdom(store, valid.kingdom_id).await?;
        let land = kingdom.resources.land;

        // The ritual yield; a kingdom too small to summon a single troop is
        // short on land, reported like any other insufficiency.
        let quantity = summon_troops(kingdom.race, land);
        if quantity == 0 {
            let rate_bp = races::traits(kingdom.race).summon_rate_bp.max(1);
            return Err(EngineError::InsufficientResources {
                resource: ResourceKind::Land,
                required: 10_000_u64.div_ceil(rate_bp),
                current: land,
            });
        }

        // Sufficiency: gold to equip, then peasants to draft.
        let cost = quantity
            .checked_mul(unit_gold_cost(valid.kind))
            .ok_or_else(|| EngineError::Internal {
                context: String::from("training cost overflow"),
            })?;
        let gold = kingdom.resources.gold;
        if gold < cost {
            return Err(EngineError::InsufficientResources {
                resource: ResourceKind::Gold,
                required: cost,
                current: gold,
            });
        }
        let population = kingdom.resources.population;
        if population < quantity {
            return Err(EngineError::InsufficientResources {
                resource: ResourceKind::Population,
                required: quantity,
                current: population,
            });
        }

        let mut total_units = kingdom.total_units.clone();
        let entry = total_units.entry(valid.kind).or_insert(0);
        *entry = entry
            .checked_add(quantity)
            .ok_or_else(|| EngineError::Internal {
                context: String::from("unit count overflow"),
            })?;

        let patch = KingdomPatch {
            resources: Some(ResourcesPatch {
                gold: Some(gold.saturating_sub(cost)),
                population: Some(population.saturating_sub(quantity)),
                ..ResourcesPatch::default()
            }),
            total_units: Some(total_units),
            ..KingdomPatch::default()
        };

        match store.update_kingdom(kingdom.id, kingdom.version, patch).await {
            Ok(updated) => {
                let stack = store
                    .create_unit_stack(NewUnitStack {
                        kingdom_id: kingdom.id,
                        kind: valid.kind,
                        quantity,
                    })
                    .await
                    .map_err(|error| EngineError::Internal {
                        context: format!("unit stack creation failed after debit: {error}"),
                    })?;

                tracing::info!(
                    kingdom = %kingdom.id,
                    unit = valid.kind.name(),
                    quantity,
                    trained_by = %caller.subject_id,
                    "units trained"
                );
                return Ok(json!({
                    "unit": valid.kind.name(),
                    "quantity": quantity,
                    "stack_id": stack.id,
                    "gold_spent": cost,
                    "gold_remaining": updated.resources.gold,
                    "population_remaining": updated.resources.population,
                }));
            }
            Err(StoreError::VersionConflict { .. }) => {
                tracing::debug!(kingdom = %kingdom.id, attempt, "train commit conflicted, retrying");
            }
            Err(other) => return Err(other.into()),
        }
    }

    Err(retries_exhausted(ActionType::TrainUnits))
}
