//! The generate-resources handler.
//!
//! Converts spent turns into gold, population, and elan. Gold comes from
//! peasants and income buildings, population grows with housing up to the
//! land's capacity, and temples generate elan up to the racial cap. This is
//! the one handler that updates the aggregate without creating a child
//! entity.

use regna_types::{
    ActionOutcome, ActionType, BuildingKind, Caller, GenerateResourcesRequest, KingdomPatch,
    ResourcesPatch,
};
use serde_json::json;

use regna_formulas::{elan_generation, gold_income, max_elan, population_cap, population_growth};

use crate::error::EngineError;
use crate::store::{KingdomStore, StoreError};
use crate::validation;

use super::{MAX_COMMIT_ATTEMPTS, load_kingdom, outcome_from_error, retries_exhausted};

/// Generate resources for a kingdom by spending turns.
pub async fn generate_resources<S>(
    store: &S,
    caller: &Caller,
    request: &GenerateResourcesRequest,
) -> ActionOutcome
where
    S: KingdomStore,
{
    match resolve(store, caller, request).await {
        Ok(payload) => ActionOutcome::ok(payload),
        Err(error) => {
            outcome_from_error(ActionType::GenerateResources, request.kingdom_id, &error)
        }
    }
}

async fn resolve<S>(
    store: &S,
    caller: &Caller,
    request: &GenerateResourcesRequest,
) -> Result<serde_json::Value, EngineError>
where
    S: KingdomStore,
{
    let valid = validation::validate_generate(request)?;

    for attempt in 0..MAX_COMMIT_ATTEMPTS {
        let kingdom = load_kingdom(store, valid.kingdom_id).await?;

        let income_buildings = kingdom.building_count(BuildingKind::Guildhall);
        let housing = kingdom.building_count(BuildingKind::Cottage);
        let temples = kingdom.building_count(BuildingKind::Temple);
        let pop_cap = population_cap(kingdom.resources.land);
        let mana_cap = max_elan(temples, kingdom.race);

        let mut gold = kingdom.resources.gold;
        let mut population = kingdom.resources.population;
        let mut mana = kingdom.resources.mana;

        for _ in 0..valid.turns {
            gold = gold.saturating_add(gold_income(population, income_buildings));
            population =
                population.saturating_add(population_growth(population, housing, pop_cap));
            // Generation never confiscates a balance already above the cap;
            // it just stops adding.
            let generated = mana
                .saturating_add(elan_generation(temples, kingdom.race))
                .min(mana_cap);
            mana = mana.max(generated);
        }

        let patch = KingdomPatch {
            resources: Some(ResourcesPatch {
                gold: Some(gold),
                population: Some(population),
                mana: Some(mana),
                ..ResourcesPatch::default()
            }),
            ..KingdomPatch::default()
        };

        match store.update_kingdom(kingdom.id, kingdom.version, patch).await {
            Ok(updated) => {
                tracing::info!(
                    kingdom = %kingdom.id,
                    turns = valid.turns,
                    generated_by = %caller.subject_id,
                    "resources generated"
                );
                return Ok(json!({
                    "turns": valid.turns,
                    "gold_gained": gold.saturating_sub(kingdom.resources.gold),
                    "population_gained": population.saturating_sub(kingdom.resources.population),
                    "mana_gained": mana.saturating_sub(kingdom.resources.mana),
                    "gold": updated.resources.gold,
                    "population": updated.resources.population,
                    "mana": updated.resources.mana,
                }));
            }
            Err(StoreError::VersionConflict { .. }) => {
                tracing::debug!(kingdom = %kingdom.id, attempt, "generate commit conflicted, retrying");
            }
            Err(other) => return Err(other.into()),
        }
    }

    Err(retries_exhausted(ActionType::GenerateResources))
}
