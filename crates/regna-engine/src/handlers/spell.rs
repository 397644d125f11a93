//! The cast-spell handler.
//!
//! A cast pays the spell's elan price; the resulting balance is clamped into
//! `[0, max_elan]`. A kingdom casting with fewer temples than the spell's
//! required support still resolves the spell but suffers backlash: temples
//! collapse, extra elan burns off, and the recovery turns are reported in
//! the payload for the host's turn bank.

use regna_types::{
    ActionOutcome, ActionType, BuildingKind, Caller, CastSpellRequest, KingdomPatch,
    NewSpellEffect, ResourceKind, ResourcesPatch,
};
use serde_json::json;

use regna_formulas::{backlash, elan_after_cast, max_elan, spell_cost};

use crate::error::EngineError;
use crate::store::{KingdomStore, SpellEffectStore, StoreError, TerritoryStore};
use crate::validation;

use super::{MAX_COMMIT_ATTEMPTS, load_kingdom, outcome_from_error, retries_exhausted};

/// Cast a spell for a kingdom.
pub async fn cast_spell<S>(store: &S, caller: &Caller, request: &CastSpellRequest) -> ActionOutcome
where
    S: KingdomStore + TerritoryStore + SpellEffectStore,
{
    match resolve(store, caller, request).await {
        Ok(payload) => ActionOutcome::ok(payload),
        Err(error) => outcome_from_error(ActionType::CastSpell, request.kingdom_id, &error),
    }
}

async fn resolve<S>(
    store: &S,
    caller: &Caller,
    request: &CastSpellRequest,
) -> Result<serde_json::Value, EngineError>
where
    S: KingdomStore + TerritoryStore + SpellEffectStore,
{
    let valid = validation::validate_cast(request)?;
    let cost = spell_cost(valid.spell);

    for attempt in 0..MAX_COMMIT_ATTEMPTS {
        let kingdom = load_kingdom(store, valid.kingdom_id).await?;

        // A target territory, when named, must belong to the casting kingdom.
        if let Some(target) = valid.target_territory {
            let territories = store.list_territories(valid.kingdom_id).await?;
            if !territories.iter().any(|territory| territory.id == target) {
                return Err(EngineError::InvalidParam {
                    field: "target_territory",
                    reason: format!("territory {target} does not belong to this kingdom"),
                });
            }
        }

        // Sufficiency: the elan price. Insufficient elan is a plain
        // rejection and never triggers backlash.
        let mana = kingdom.resources.mana;
        if mana < cost.elan {
            return Err(EngineError::InsufficientResources {
                resource: ResourceKind::Mana,
                required: cost.elan,
                current: mana,
            });
        }

        let temples = kingdom.building_count(BuildingKind::Temple);
        let cap = max_elan(temples, kingdom.race);
        let mut mana_after = elan_after_cast(mana, cost.elan, cap);

        // Backlash: casting beyond the kingdom's temple support.
        let backlash_hit = if temples < cost.required_temples {
            Some(backlash(temples, kingdom.race))
        } else {
            None
        };

        let mut buildings_patch = None;
        if let Some(hit) = backlash_hit {
            let temples_after = temples.saturating_sub(hit.temples_destroyed);
            mana_after = mana_after
                .saturating_sub(hit.elan_lost)
                .min(max_elan(temples_after, kingdom.race));
            let mut buildings = kingdom.buildings.clone();
            buildings.insert(BuildingKind::Temple, temples_after);
            buildings_patch = Some(buildings);
        }

        let patch = KingdomPatch {
            resources: Some(ResourcesPatch {
                mana: Some(mana_after),
                ..ResourcesPatch::default()
            }),
            buildings: buildings_patch,
            ..KingdomPatch::default()
        };

        match store.update_kingdom(kingdom.id, kingdom.version, patch).await {
            Ok(updated) => {
                let effect = store
                    .create_spell_effect(NewSpellEffect {
                        kingdom_id: kingdom.id,
                        spell: valid.spell,
                        target_territory: valid.target_territory,
                        backlash: backlash_hit.is_some(),
                        duration_turns: cost.duration_turns,
                    })
                    .await
                    .map_err(|error| EngineError::Internal {
                        context: format!("spell effect creation failed after debit: {error}"),
                    })?;

                tracing::info!(
                    kingdom = %kingdom.id,
                    spell = valid.spell.name(),
                    backlash = backlash_hit.is_some(),
                    cast_by = %caller.subject_id,
                    "spell cast"
                );
                return Ok(json!({
                    "spell": valid.spell.name(),
                    "effect_id": effect.id,
                    "duration_turns": cost.duration_turns,
                    "elan_spent": cost.elan,
                    "elan_remaining": updated.resources.mana,
                    "backlash": backlash_hit.map(|hit| json!({
                        "temples_destroyed": hit.temples_destroyed,
                        "elan_lost": hit.elan_lost,
                        "turns_cost": hit.turns_cost,
                    })),
                }));
            }
            Err(StoreError::VersionConflict { .. }) => {
                tracing::debug!(kingdom = %kingdom.id, attempt, "cast commit conflicted, retrying");
            }
            Err(other) => return Err(other.into()),
        }
    }

    Err(retries_exhausted(ActionType::CastSpell))
}
