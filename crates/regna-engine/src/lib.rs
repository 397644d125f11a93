//! Action validation and resolution for the Regna rules engine.
//!
//! This crate sits between `regna-types` (data structures) and the store
//! backends in `regna-db`: it validates raw action requests, loads the
//! kingdom aggregate through the [`store`] contract, prices the action with
//! `regna-formulas`, and commits the result with a conditional
//! (compare-and-swap) kingdom update followed by the child-entity create.
//!
//! Nothing in this crate raises past a handler boundary -- every path
//! terminates in a structured [`regna_types::ActionOutcome`].
//!
//! # Modules
//!
//! - [`error`] -- Typed stage failures ([`EngineError`]) and their codes
//! - [`store`] -- The persisted-entity collaborator contract
//! - [`validation`] -- The ordered, short-circuiting validation pipeline
//! - [`handlers`] -- One resolution handler per action kind

pub mod error;
pub mod handlers;
pub mod store;
pub mod validation;

// Re-export the primary surface at crate root for convenience.
pub use error::EngineError;
pub use handlers::{
    MAX_COMMIT_ATTEMPTS, cast_spell, claim_territory, construct_building, generate_resources,
    train_units,
};
pub use store::{KingdomStore, SpellEffectStore, StoreError, TerritoryStore, UnitStackStore};
pub use validation::{
    ValidCast, ValidClaim, ValidConstruct, ValidGenerate, ValidTrain, validate_cast,
    validate_claim, validate_construct, validate_generate, validate_train,
};
