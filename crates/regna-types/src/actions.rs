//! Action request and outcome types for the engine's external contract.
//!
//! Raw requests are the shape the host hands to the engine: identifiers may
//! be absent and enum-valued fields arrive as wire-name strings. The
//! validation pipeline (in `regna-engine`) turns a raw request into its
//! validated counterpart or rejects it with a typed error code -- nothing
//! here enforces domain rules.

use serde::{Deserialize, Serialize};

use crate::enums::ErrorCode;
use crate::ids::{KingdomId, TerritoryId};

// ---------------------------------------------------------------------------
// Caller identity
// ---------------------------------------------------------------------------

/// The already-authenticated caller identity supplied by the host.
///
/// The engine records it on created entities but never validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// Stable subject identifier from the host's auth layer.
    pub subject_id: String,
    /// Display name at request time.
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Coordinates on the wire
// ---------------------------------------------------------------------------

/// Coordinates as they arrive on the wire: either a structured pair or an
/// encoded `"x,y"` string. Both forms normalize to the same two integer
/// components before range-checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    /// Structured form: `{"x": 3, "y": -4}`.
    Pair {
        /// East-west component.
        x: i32,
        /// North-south component.
        y: i32,
    },
    /// Encoded form: `"3,-4"`.
    Encoded(String),
}

// ---------------------------------------------------------------------------
// Raw requests, one per action kind
// ---------------------------------------------------------------------------

/// Raw claim-territory request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimTerritoryRequest {
    /// The kingdom performing the claim.
    pub kingdom_id: Option<KingdomId>,
    /// Territory display name (2--50 characters).
    pub name: Option<String>,
    /// Territory type wire name; defaults to `settlement` when omitted.
    pub territory_type: Option<String>,
    /// Terrain type wire name; defaults to `plains` when omitted.
    pub terrain_type: Option<String>,
    /// Target cell; defaults to the origin when omitted.
    pub coordinates: Option<CoordinateInput>,
}

/// Raw construct-building request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructBuildingRequest {
    /// The kingdom constructing.
    pub kingdom_id: Option<KingdomId>,
    /// Building kind wire name.
    pub building: Option<String>,
    /// How many structures to construct.
    pub count: Option<u64>,
}

/// Raw train-units request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainUnitsRequest {
    /// The kingdom training.
    pub kingdom_id: Option<KingdomId>,
    /// Unit kind wire name; defaults to `infantry` when omitted.
    pub unit: Option<String>,
}

/// Raw cast-spell request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastSpellRequest {
    /// The casting kingdom.
    pub kingdom_id: Option<KingdomId>,
    /// Spell wire name.
    pub spell: Option<String>,
    /// Optional target territory.
    pub target_territory: Option<TerritoryId>,
}

/// Raw generate-resources request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateResourcesRequest {
    /// The generating kingdom.
    pub kingdom_id: Option<KingdomId>,
    /// How many turns to spend.
    pub turns: Option<u64>,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The structured result of a resolution handler.
///
/// Every path through the engine terminates in one of these; nothing raises
/// past the handler boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Whether the action committed.
    pub success: bool,
    /// Action-specific payload, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    /// Human-readable failure description, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable failure code, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
}

impl ActionOutcome {
    /// Build a success outcome with the given payload.
    pub const fn ok(payload: serde_json::Value) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error: None,
            error_code: None,
        }
    }

    /// Build a failure outcome with the given code and message.
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            error: Some(message.into()),
            error_code: Some(code),
        }
    }
}
