//! The construct-building handler.
//!
//! Construction is priced per structure; the build rate (BRT) comes from the
//! kingdom's quarry percentage and the payload reports how many turns the
//! order takes plus an efficiency warning when the count does not fill
//! whole turns.

use regna_types::{
    ActionOutcome, ActionType, BuildingKind, Caller, ConstructBuildingRequest, KingdomPatch,
    ResourceKind, ResourcesPatch,
};
use serde_json::json;

use regna_formulas::{
    build_efficiency_warning, build_rate_turns, build_turns, building_display_name,
    building_gold_cost, quarry_percentage,
};

use crate::error::EngineError;
use crate::store::{KingdomStore, StoreError};
use crate::validation;

use super::{MAX_COMMIT_ATTEMPTS, load_kingdom, outcome_from_error, retries_exhausted};

/// Construct buildings for a kingdom.
pub async fn construct_building<S>(
    store: &S,
    caller: &Caller,
    request: &ConstructBuildingRequest,
) -> ActionOutcome
where
    S: KingdomStore,
{
    match resolve(store, caller, request).await {
        Ok(payload) => ActionOutcome::ok(payload),
        Err(error) => {
            outcome_from_error(ActionType::ConstructBuilding, request.kingdom_id, &error)
        }
    }
}

async fn resolve<S>(
    store: &S,
    caller: &Caller,
    request: &ConstructBuildingRequest,
) -> Result<serde_json::Value, EngineError>
where
    S: KingdomStore,
{
    let valid = validation::validate_construct(request)?;

    for attempt in 0..MAX_COMMIT_ATTEMPTS {
        let kingdom = load_kingdom(store, valid.kingdom_id).await?;

        // Sufficiency: count structures at the per-kind price.
        let cost = valid
            .count
            .checked_mul(building_gold_cost(valid.kind))
            .ok_or_else(|| EngineError::Internal {
                context: String::from("construction cost overflow"),
            })?;
        let gold = kingdom.resources.gold;
        if gold < cost {
            return Err(EngineError::InsufficientResources {
                resource: ResourceKind::Gold,
                required: cost,
                current: gold,
            });
        }

        // Build rate from the quarry share of the kingdom's land, before
        // this order's own quarries are added.
        let quarries = kingdom.building_count(BuildingKind::Quarry);
        let brt = build_rate_turns(quarry_percentage(quarries, kingdom.resources.land));
        let turns = build_turns(valid.count, brt);
        let warning = build_efficiency_warning(valid.count, brt);

        let mut buildings = kingdom.buildings.clone();
        let entry = buildings.entry(valid.kind).or_insert(0);
        *entry = entry
            .checked_add(valid.count)
            .ok_or_else(|| EngineError::Internal {
                context: String::from("building count overflow"),
            })?;

        let patch = KingdomPatch {
            resources: Some(ResourcesPatch {
                gold: Some(gold.saturating_sub(cost)),
                ..ResourcesPatch::default()
            }),
            buildings: Some(buildings),
            ..KingdomPatch::default()
        };

        match store.update_kingdom(kingdom.id, kingdom.version, patch).await {
            Ok(updated) => {
                tracing::info!(
                    kingdom = %kingdom.id,
                    building = valid.kind.name(),
                    count = valid.count,
                    turns,
                    ordered_by = %caller.subject_id,
                    "construction ordered"
                );
                return Ok(json!({
                    "building": valid.kind.name(),
                    "display_name": building_display_name(
                        kingdom.race.name(),
                        valid.kind.category(),
                    ),
                    "count": valid.count,
                    "build_rate_turns": brt,
                    "turns": turns,
                    "efficiency_warning": warning.map(|w| w.to_string()),
                    "gold_spent": cost,
                    "gold_remaining": updated.resources.gold,
                }));
            }
            Err(StoreError::VersionConflict { .. }) => {
                tracing::debug!(kingdom = %kingdom.id, attempt, "construct commit conflicted, retrying");
            }
            Err(other) => return Err(other.into()),
        }
    }

    Err(retries_exhausted(ActionType::ConstructBuilding))
}
