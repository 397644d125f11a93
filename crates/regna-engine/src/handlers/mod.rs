//! Resolution handlers, one per action kind.
//!
//! Every handler walks the same five stages; failure at any stage halts
//! with zero side effects from later stages:
//!
//! 1. Validate the raw request ([`crate::validation`]).
//! 2. Load the kingdom aggregate (absence is `NOT_FOUND`).
//! 3. Domain conflict check (e.g. duplicate territory coordinates), always
//!    before any deduction.
//! 4. Sufficiency check against the formula library's cost, reporting both
//!    required and current amounts on failure.
//! 5. Commit: a conditional kingdom update (expected-version CAS), then the
//!    child-entity create. A version conflict re-runs stages 2--4; the
//!    retry budget is [`MAX_COMMIT_ATTEMPTS`].
//!
//! Handlers never raise past their boundary: [`outcome_from_error`] is the
//! single catch-all that turns an [`EngineError`] into a structured
//! [`ActionOutcome`], logging internal causes out-of-band and hiding them
//! from the caller.
//!
//! # Submodules
//!
//! - [`claim`] -- Claim a territory (flat 500 gold).
//! - [`construct`] -- Construct buildings (BRT, turns, efficiency warning).
//! - [`train`] -- Train units via the summoning ritual.
//! - [`spell`] -- Cast a spell (elan cost, backlash below temple support).
//! - [`resources`] -- Convert turns into generated resources.

pub mod claim;
pub mod construct;
pub mod resources;
pub mod spell;
pub mod train;

pub use claim::claim_territory;
pub use construct::construct_building;
pub use resources::generate_resources;
pub use spell::cast_spell;
pub use train::train_units;

use regna_types::{ActionOutcome, ActionType, ErrorCode, Kingdom, KingdomId};

use crate::error::EngineError;
use crate::store::KingdomStore;

/// How many times a handler re-runs stages 2--4 after a version conflict
/// before giving up with an internal error.
pub const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// Load the kingdom aggregate; absence is a caller-visible `NOT_FOUND`.
pub(crate) async fn load_kingdom<S: KingdomStore>(
    store: &S,
    id: KingdomId,
) -> Result<Kingdom, EngineError> {
    store
        .get_kingdom(id)
        .await?
        .ok_or(EngineError::KingdomNotFound(id))
}

/// The single catch-all boundary: convert a stage failure into an outcome.
///
/// Internal faults are logged with full context (action kind, kingdom id,
/// raw cause) and reported to the caller with a generic message; every
/// other failure keeps its human-readable description and typed code.
pub(crate) fn outcome_from_error(
    action: ActionType,
    kingdom_id: Option<KingdomId>,
    error: &EngineError,
) -> ActionOutcome {
    match error {
        EngineError::Internal { context } => {
            tracing::error!(
                action = action.name(),
                kingdom_id = ?kingdom_id,
                cause = %context,
                "action failed internally"
            );
            ActionOutcome::failure(ErrorCode::InternalError, "an internal error occurred")
        }
        other => {
            tracing::warn!(
                action = action.name(),
                kingdom_id = ?kingdom_id,
                error = %other,
                "action rejected"
            );
            ActionOutcome::failure(other.code(), other.to_string())
        }
    }
}

/// Shorthand for the exhausted-retries internal error.
pub(crate) fn retries_exhausted(action: ActionType) -> EngineError {
    EngineError::Internal {
        context: format!("{} commit retries exhausted", action.name()),
    }
}
