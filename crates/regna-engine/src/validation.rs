//! The action validation pipeline.
//!
//! Runs before any state read. Checks are ordered and short-circuit on the
//! first failure:
//!
//! 1. Presence of required identifiers/fields -- `MISSING_PARAMS`.
//! 2. Field-level domain checks (string length, numeric range, enum
//!    membership) -- `INVALID_PARAM`.
//! 3. Structural parse of compound fields: coordinates arrive as a
//!    structured pair or an encoded `"x,y"` string, and both forms
//!    normalize to the same two integer components before range-checking.
//!
//! Defaults for optional fields apply only after presence/shape checks
//! succeed, and an applied default is not re-validated.

use regna_types::{
    BuildingKind, CastSpellRequest, ClaimTerritoryRequest, ConstructBuildingRequest,
    CoordinateInput, Coordinates, GenerateResourcesRequest, KingdomId, Spell, TerrainKind,
    TerritoryId, TerritoryKind, TrainUnitsRequest, UnitKind,
};

use crate::error::EngineError;

/// Minimum territory name length in characters.
pub const NAME_MIN_CHARS: usize = 2;
/// Maximum territory name length in characters.
pub const NAME_MAX_CHARS: usize = 50;
/// Coordinate component bounds, inclusive.
pub const COORDINATE_BOUND: i32 = 10_000;
/// Largest structure count a single construct order may carry.
pub const MAX_BUILD_COUNT: u64 = 5_000;
/// Largest turn count a single generate order may spend.
pub const MAX_GENERATE_TURNS: u64 = 100;

// ---------------------------------------------------------------------------
// Validated requests
// ---------------------------------------------------------------------------

/// A claim request that passed the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidClaim {
    /// The claiming kingdom.
    pub kingdom_id: KingdomId,
    /// Territory name, 2--50 characters.
    pub name: String,
    /// Territory type (defaulted to settlement when omitted).
    pub kind: TerritoryKind,
    /// Terrain type (defaulted to plains when omitted).
    pub terrain: TerrainKind,
    /// Normalized, range-checked coordinates.
    pub coordinates: Coordinates,
}

/// A construct request that passed the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidConstruct {
    /// The constructing kingdom.
    pub kingdom_id: KingdomId,
    /// What to build.
    pub kind: BuildingKind,
    /// How many structures, in [1, `MAX_BUILD_COUNT`].
    pub count: u64,
}

/// A train request that passed the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidTrain {
    /// The training kingdom.
    pub kingdom_id: KingdomId,
    /// The unit kind (defaulted to infantry when omitted).
    pub kind: UnitKind,
}

/// A cast request that passed the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidCast {
    /// The casting kingdom.
    pub kingdom_id: KingdomId,
    /// The spell to cast.
    pub spell: Spell,
    /// Optional target territory.
    pub target_territory: Option<TerritoryId>,
}

/// A generate request that passed the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidGenerate {
    /// The generating kingdom.
    pub kingdom_id: KingdomId,
    /// Turns to spend, in [1, `MAX_GENERATE_TURNS`].
    pub turns: u64,
}

// ---------------------------------------------------------------------------
// Shared checks
// ---------------------------------------------------------------------------

fn require<T>(field: &'static str, value: Option<T>) -> Result<T, EngineError> {
    value.ok_or(EngineError::MissingParams { field })
}

/// Normalize either wire form of coordinates into integer components.
///
/// The encoded form is `"x,y"` with optional surrounding whitespace per
/// component. Both forms produce identical [`Coordinates`].
fn normalize_coordinates(input: &CoordinateInput) -> Result<Coordinates, EngineError> {
    match input {
        CoordinateInput::Pair { x, y } => Ok(Coordinates { x: *x, y: *y }),
        CoordinateInput::Encoded(text) => {
            let (raw_x, raw_y) =
                text.split_once(',')
                    .ok_or_else(|| EngineError::InvalidParam {
                        field: "coordinates",
                        reason: format!("expected \"x,y\", got {text:?}"),
                    })?;
            let x = raw_x
                .trim()
                .parse::<i32>()
                .map_err(|_| EngineError::InvalidParam {
                    field: "coordinates",
                    reason: format!("x component {raw_x:?} is not an integer"),
                })?;
            let y = raw_y
                .trim()
                .parse::<i32>()
                .map_err(|_| EngineError::InvalidParam {
                    field: "coordinates",
                    reason: format!("y component {raw_y:?} is not an integer"),
                })?;
            Ok(Coordinates { x, y })
        }
    }
}

fn check_coordinate_range(coordinates: Coordinates) -> Result<Coordinates, EngineError> {
    let bound = COORDINATE_BOUND;
    if coordinates.x < -bound
        || coordinates.x > bound
        || coordinates.y < -bound
        || coordinates.y > bound
    {
        return Err(EngineError::InvalidParam {
            field: "coordinates",
            reason: format!("{coordinates} outside [-{bound}, {bound}]"),
        });
    }
    Ok(coordinates)
}

// ---------------------------------------------------------------------------
// Per-action validation
// ---------------------------------------------------------------------------

/// Validate a claim-territory request.
pub fn validate_claim(request: &ClaimTerritoryRequest) -> Result<ValidClaim, EngineError> {
    // Stage 1: presence.
    let kingdom_id = require("kingdom_id", request.kingdom_id)?;
    let name = require("name", request.name.clone())?;

    // Stage 2: domain checks.
    let name_chars = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_chars) {
        return Err(EngineError::InvalidParam {
            field: "name",
            reason: format!(
                "length {name_chars} outside [{NAME_MIN_CHARS}, {NAME_MAX_CHARS}]"
            ),
        });
    }

    let kind = match request.territory_type.as_deref() {
        None => TerritoryKind::default(),
        Some(raw) => TerritoryKind::parse(raw).ok_or_else(|| EngineError::InvalidParam {
            field: "territory_type",
            reason: format!("unknown territory type {raw:?}"),
        })?,
    };
    let terrain = match request.terrain_type.as_deref() {
        None => TerrainKind::default(),
        Some(raw) => TerrainKind::parse(raw).ok_or_else(|| EngineError::InvalidParam {
            field: "terrain_type",
            reason: format!("unknown terrain type {raw:?}"),
        })?,
    };

    // Stage 3: structural normalization, then range check. An omitted cell
    // defaults to the origin after shape checks, like kind and terrain.
    let coordinates = match request.coordinates.as_ref() {
        None => Coordinates::default(),
        Some(input) => check_coordinate_range(normalize_coordinates(input)?)?,
    };

    Ok(ValidClaim {
        kingdom_id,
        name,
        kind,
        terrain,
        coordinates,
    })
}

/// Validate a construct-building request.
pub fn validate_construct(
    request: &ConstructBuildingRequest,
) -> Result<ValidConstruct, EngineError> {
    let kingdom_id = require("kingdom_id", request.kingdom_id)?;
    let raw_building = require("building", request.building.as_deref())?;
    let count = require("count", request.count)?;

    let kind = BuildingKind::parse(raw_building).ok_or_else(|| EngineError::InvalidParam {
        field: "building",
        reason: format!("unknown building kind {raw_building:?}"),
    })?;

    if !(1..=MAX_BUILD_COUNT).contains(&count) {
        return Err(EngineError::InvalidParam {
            field: "count",
            reason: format!("count {count} outside [1, {MAX_BUILD_COUNT}]"),
        });
    }

    Ok(ValidConstruct {
        kingdom_id,
        kind,
        count,
    })
}

/// Validate a train-units request.
pub fn validate_train(request: &TrainUnitsRequest) -> Result<ValidTrain, EngineError> {
    let kingdom_id = require("kingdom_id", request.kingdom_id)?;

    let kind = match request.unit.as_deref() {
        None => UnitKind::default(),
        Some(raw) => UnitKind::parse(raw).ok_or_else(|| EngineError::InvalidParam {
            field: "unit",
            reason: format!("unknown unit kind {raw:?}"),
        })?,
    };

    Ok(ValidTrain { kingdom_id, kind })
}

/// Validate a cast-spell request.
pub fn validate_cast(request: &CastSpellRequest) -> Result<ValidCast, EngineError> {
    let kingdom_id = require("kingdom_id", request.kingdom_id)?;
    let raw_spell = require("spell", request.spell.as_deref())?;

    let spell = Spell::parse(raw_spell).ok_or_else(|| EngineError::InvalidParam {
        field: "spell",
        reason: format!("unknown spell {raw_spell:?}"),
    })?;

    Ok(ValidCast {
        kingdom_id,
        spell,
        target_territory: request.target_territory,
    })
}

/// Validate a generate-resources request.
pub fn validate_generate(
    request: &GenerateResourcesRequest,
) -> Result<ValidGenerate, EngineError> {
    let kingdom_id = require("kingdom_id", request.kingdom_id)?;
    let turns = require("turns", request.turns)?;

    if !(1..=MAX_GENERATE_TURNS).contains(&turns) {
        return Err(EngineError::InvalidParam {
            field: "turns",
            reason: format!("turns {turns} outside [1, {MAX_GENERATE_TURNS}]"),
        });
    }

    Ok(ValidGenerate { kingdom_id, turns })
}
