//! The transfer decision output family.
//!
//! A decision takes one of three shapes:
//!
//! - **Assignment** -- MCI/PHE single-destination transfer with ranked
//!   alternatives and the solver status.
//! - **Evacuation** -- MEDEVAC transfer as an ordered Role 1 -> 2 -> 3 hop
//!   chain with timeline compliance flags.
//! - **Forfeit** -- no transfer; the reasoning code explains why. The chain
//!   is empty and the destination is null.
//!
//! All ETA-like quantities are `f64` minutes internally and round to one
//! decimal on serialization so that identical inputs produce byte-identical
//! JSON.

use serde::{Deserialize, Serialize, Serializer};

use crate::enums::{CareRole, DecisionAction, FacilityLevel, ReasoningCode, SolverStatus};
use crate::ids::FacilityId;

/// Serialize minutes rounded to one decimal place.
fn round_minutes<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 10.0).round() / 10.0)
}

/// Serialize optional minutes rounded to one decimal place (`None` = null).
fn round_minutes_opt<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(minutes) => serializer.serialize_some(&((minutes * 10.0).round() / 10.0)),
        None => serializer.serialize_none(),
    }
}

/// A single-destination target (primary or alternative).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    /// Identifier of the receiving facility.
    pub facility_id: FacilityId,
    /// Display name of the receiving facility.
    pub facility_name: String,
    /// Travel time from the patient to the facility, in minutes.
    #[serde(serialize_with = "round_minutes")]
    pub eta_minutes: f64,
}

/// One hop of a MEDEVAC evacuation chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvacuationHop {
    /// NATO care role delivered at this hop.
    pub role: CareRole,
    /// Facility level (serialized numerically).
    pub level: FacilityLevel,
    /// Identifier of the facility visited.
    pub facility_id: FacilityId,
    /// Display name of the facility visited.
    pub facility_name: String,
    /// Travel time from the previous hop (or the patient), in minutes.
    #[serde(serialize_with = "round_minutes")]
    pub eta_minutes: f64,
    /// Total elapsed minutes from the patient to this hop.
    #[serde(serialize_with = "round_minutes")]
    pub cumulative_time: f64,
    /// Whether this hop arrives within its role's cumulative budget.
    pub timeline_compliance: bool,
}

/// NATO 10-1-2 compliance summary for an evacuation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatoCompliance {
    /// Role 1 reached within the Golden Hour (60 min cumulative).
    pub role1_compliant: bool,
    /// Role 2 reached within the Damage Control window (120 min cumulative).
    pub role2_compliant: bool,
    /// Final hop reached within the patient's survival window.
    pub survival_compliant: bool,
}

/// A single-destination transfer (MCI/PHE).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentDecision {
    /// Always [`DecisionAction::Transfer`].
    pub action: DecisionAction,
    /// Always [`ReasoningCode::TransferOptimal`].
    pub reasoning_code: ReasoningCode,
    /// Free-text summary derived from the reasoning code.
    pub reasoning: String,
    /// The chosen facility.
    pub destination: Destination,
    /// Up to three ranked alternatives, best first, excluding the
    /// destination.
    pub alternatives: Vec<Destination>,
    /// Status of the primary solve.
    pub solver_status: SolverStatus,
}

/// A multi-hop MEDEVAC transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvacuationDecision {
    /// Always [`DecisionAction::Transfer`].
    pub action: DecisionAction,
    /// Always [`ReasoningCode::EvacuationChainOptimal`].
    pub reasoning_code: ReasoningCode,
    /// Free-text summary derived from the reasoning code.
    pub reasoning: String,
    /// Hops ordered Role 1 -> Role 2 -> Role 3 (facility levels 3 -> 2 -> 1).
    pub evacuation_chain: Vec<EvacuationHop>,
    /// Total minutes from the patient to the final hop.
    #[serde(serialize_with = "round_minutes")]
    pub total_time_minutes: f64,
    /// Survival window in minutes; null when the patient has no predicted
    /// death time.
    #[serde(serialize_with = "round_minutes_opt")]
    pub survival_window_minutes: Option<f64>,
    /// Timeline compliance summary.
    pub nato_compliance: NatoCompliance,
}

/// A forfeited decision: no transfer is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForfeitDecision {
    /// Always [`DecisionAction::Forfeit`].
    pub action: DecisionAction,
    /// Why the transfer was forfeited.
    pub reasoning_code: ReasoningCode,
    /// Free-text summary derived from the reasoning code.
    pub reasoning: String,
    /// Always null.
    #[serde(default)]
    pub destination: Option<Destination>,
    /// Always empty.
    #[serde(default)]
    pub evacuation_chain: Vec<EvacuationHop>,
}

/// The outcome of one transfer decision.
///
/// Serialization is untagged: each variant's field set is disjoint enough
/// that the JSON shape identifies it (forfeits carry a null destination and
/// an empty chain; the `Forfeit` variant must stay last so deserialization
/// tries the richer shapes first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransferDecision {
    /// MCI/PHE single-destination transfer.
    Assignment(AssignmentDecision),
    /// MEDEVAC evacuation chain transfer.
    Evacuation(EvacuationDecision),
    /// No transfer.
    Forfeit(ForfeitDecision),
}

impl TransferDecision {
    /// Build a single-destination transfer decision.
    pub fn assignment(
        reasoning: String,
        destination: Destination,
        alternatives: Vec<Destination>,
        solver_status: SolverStatus,
    ) -> Self {
        Self::Assignment(AssignmentDecision {
            action: DecisionAction::Transfer,
            reasoning_code: ReasoningCode::TransferOptimal,
            reasoning,
            destination,
            alternatives,
            solver_status,
        })
    }

    /// Build an evacuation chain transfer decision.
    pub fn evacuation(
        reasoning: String,
        evacuation_chain: Vec<EvacuationHop>,
        total_time_minutes: f64,
        survival_window_minutes: Option<f64>,
        nato_compliance: NatoCompliance,
    ) -> Self {
        Self::Evacuation(EvacuationDecision {
            action: DecisionAction::Transfer,
            reasoning_code: ReasoningCode::EvacuationChainOptimal,
            reasoning,
            evacuation_chain,
            total_time_minutes,
            survival_window_minutes,
            nato_compliance,
        })
    }

    /// Build a forfeit decision for the given reasoning code.
    pub fn forfeit(reasoning_code: ReasoningCode, reasoning: String) -> Self {
        Self::Forfeit(ForfeitDecision {
            action: DecisionAction::Forfeit,
            reasoning_code,
            reasoning,
            destination: None,
            evacuation_chain: Vec::new(),
        })
    }

    /// The action this decision commits to.
    pub const fn action(&self) -> DecisionAction {
        match self {
            Self::Assignment(_) | Self::Evacuation(_) => DecisionAction::Transfer,
            Self::Forfeit(_) => DecisionAction::Forfeit,
        }
    }

    /// The machine-readable reasoning code.
    pub const fn reasoning_code(&self) -> ReasoningCode {
        match self {
            Self::Assignment(decision) => decision.reasoning_code,
            Self::Evacuation(decision) => decision.reasoning_code,
            Self::Forfeit(decision) => decision.reasoning_code,
        }
    }

    /// The free-text reasoning summary.
    pub fn reasoning(&self) -> &str {
        match self {
            Self::Assignment(decision) => &decision.reasoning,
            Self::Evacuation(decision) => &decision.reasoning,
            Self::Forfeit(decision) => &decision.reasoning,
        }
    }

    /// Whether the decision is a transfer (either shape).
    pub const fn is_transfer(&self) -> bool {
        matches!(self.action(), DecisionAction::Transfer)
    }
}
