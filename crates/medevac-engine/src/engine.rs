//! Decision orchestrator: the public entry point of the engine.
//!
//! One call, one decision. The orchestrator classifies patient viability,
//! validates structural input sanity, and dispatches by incident type: MCI
//! and PHE go through the assignment optimizer, MEDEVAC through the chain
//! builder. Every outcome -- including every failure -- is a structured
//! [`TransferDecision`]; nothing is raised out-of-band.
//!
//! The engine holds no mutable state: rules are read-only after
//! construction and every decision is a pure function of its arguments, so
//! concurrent calls on disjoint inputs need no synchronization.

use std::time::Duration;

use chrono::{DateTime, Utc};
use medevac_types::{
    Facility, IncidentType, Patient, ReasoningCode, TransferDecision, TransportMode,
};
use tracing::{debug, info};

use crate::chain;
use crate::optimizer;
use crate::reasoning;
use crate::rules::Rules;
use crate::solver::{AssignmentSolver, BranchAndBound};
use crate::survival::{self, Viability};

/// Per-call options for [`TransferEngine::decide`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DecideOptions {
    /// Wall-clock budget for one solver invocation. `None` uses the rules
    /// default.
    pub deadline: Option<Duration>,
    /// Transport mode for every ETA computation in the decision.
    pub transport_mode: TransportMode,
}

/// The transfer decision engine.
///
/// Generic over the solver backend; [`BranchAndBound`] is the default. The
/// engine is cheap to construct and safe to share across threads.
#[derive(Debug, Clone)]
pub struct TransferEngine<S = BranchAndBound> {
    rules: Rules,
    solver: S,
}

impl TransferEngine {
    /// Create an engine with the given rules and the built-in solver.
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            solver: BranchAndBound::new(),
        }
    }
}

impl Default for TransferEngine {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

impl<S: AssignmentSolver> TransferEngine<S> {
    /// Create an engine with a custom solver backend.
    pub fn with_solver(rules: Rules, solver: S) -> Self {
        Self { rules, solver }
    }

    /// The rules this engine decides under.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Decide the transfer for one patient against a candidate facility
    /// set, at the given decision time.
    ///
    /// Inputs are read-only snapshots; the engine neither mutates resource
    /// counts nor reserves them across calls. For a fixed input the output
    /// is deterministic.
    pub fn decide(
        &self,
        patient: &Patient,
        facilities: &[Facility],
        incident_type: IncidentType,
        current_time: DateTime<Utc>,
        options: &DecideOptions,
    ) -> TransferDecision {
        info!(
            patient = %patient.patient_id,
            ?incident_type,
            facilities = facilities.len(),
            "deciding transfer"
        );

        let survival_window = match survival::classify(patient, current_time) {
            Viability::Forfeit(code) => {
                debug!(?code, "patient not viable for transfer");
                let text = match code {
                    ReasoningCode::NoLocation => reasoning::no_location(),
                    _ => reasoning::patient_deceased(),
                };
                return TransferDecision::forfeit(code, text);
            }
            Viability::Proceed(window) => window,
        };

        // Classification guarantees a location; destructure without panic
        // to keep the no-out-of-band-errors contract airtight.
        let Some(origin) = patient.location else {
            return TransferDecision::forfeit(
                ReasoningCode::NoLocation,
                reasoning::no_location(),
            );
        };

        if facilities.is_empty() {
            return TransferDecision::forfeit(
                ReasoningCode::NoFacilitiesAvailable,
                reasoning::no_facilities("no candidate facilities in the region"),
            );
        }

        if let Some(defect) = structural_defect(origin, facilities) {
            debug!(defect, "structurally invalid input");
            return TransferDecision::forfeit(
                ReasoningCode::NoFacilitiesAvailable,
                reasoning::no_facilities(defect),
            );
        }

        let deadline = options.deadline.unwrap_or_else(|| self.rules.solver_deadline());
        match incident_type {
            IncidentType::Mci | IncidentType::Phe => optimizer::optimize(
                patient,
                facilities,
                origin,
                survival_window,
                options.transport_mode,
                &self.rules,
                &self.solver,
                deadline,
            ),
            IncidentType::Medevac => chain::build_chain(
                patient,
                facilities,
                origin,
                survival_window,
                options.transport_mode,
                &self.rules,
            ),
        }
    }
}

/// Detect structurally invalid coordinates that schema validation should
/// have rejected upstream.
fn structural_defect(
    origin: medevac_types::GeoPoint,
    facilities: &[Facility],
) -> Option<&'static str> {
    if !origin.is_finite() {
        return Some("patient coordinates are not finite numbers");
    }
    if facilities
        .iter()
        .any(|facility| !facility.location.is_finite())
    {
        return Some("facility coordinates are not finite numbers");
    }
    None
}
