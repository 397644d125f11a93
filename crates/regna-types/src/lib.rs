//! Shared type definitions for the Regna rules engine.
//!
//! This crate is the single source of truth for the types used across the
//! workspace: entity structs, enumerations, strongly-typed identifiers, and
//! the action request/outcome contract between the host and the engine.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Enumeration types (races, resources, buildings, spells, error codes)
//! - [`structs`] -- Core entity structs (kingdom, territory, unit stacks, spell effects)
//! - [`actions`] -- Action request/outcome types for host-engine communication

pub mod actions;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::{
    ActionOutcome, Caller, CastSpellRequest, ClaimTerritoryRequest, ConstructBuildingRequest,
    CoordinateInput, GenerateResourcesRequest, TrainUnitsRequest,
};
pub use enums::{
    ActionType, BuildingKind, ErrorCode, Race, ResourceKind, Spell, TerrainKind, TerritoryKind,
    UnitKind,
};
pub use ids::{KingdomId, SpellEffectId, TerritoryId, UnitStackId};
pub use structs::{
    Coordinates, Kingdom, KingdomPatch, NewSpellEffect, NewTerritory, NewUnitStack, Resources,
    ResourcesPatch, SpellEffect, Territory, UnitStack,
};
