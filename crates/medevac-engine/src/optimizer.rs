//! Single-destination optimizer for MCI and PHE incidents.
//!
//! Formulates the patient-facility assignment as a binary ILP (see
//! [`crate::solver`]) and extracts the optimal destination plus up to
//! `max_alternatives` ranked alternatives by re-solving with the previous
//! choice excluded. Capability gaps, stewardship, and resource stress are
//! soft cost terms -- only the per-facility resource capacity rows are hard
//! constraints.

use std::collections::BTreeSet;
use std::time::Duration;

use medevac_types::{
    Destination, Facility, GeoPoint, Patient, ReasoningCode, SolverStatus, TransferDecision,
    TransportMode,
};
use tracing::debug;

use crate::cost::{self, ScoredCandidate};
use crate::eta;
use crate::reasoning;
use crate::rules::Rules;
use crate::solver::{AssignmentProblem, AssignmentSolver};
use crate::survival;

/// Decide a single-destination transfer for an MCI/PHE incident.
///
/// `origin` is the patient's position (already validated by the
/// orchestrator); `survival_window` of `None` means no deadline.
pub fn optimize<S: AssignmentSolver>(
    patient: &Patient,
    facilities: &[Facility],
    origin: GeoPoint,
    survival_window: Option<f64>,
    mode: TransportMode,
    rules: &Rules,
    solver: &S,
    deadline: Duration,
) -> TransferDecision {
    let speed = rules.speed_kmh(mode);

    // Score every candidate; the sort order doubles as the solver's
    // exploration order, which is what enforces the tie-break contract.
    let mut scored: Vec<ScoredCandidate> = facilities
        .iter()
        .enumerate()
        .map(|(index, facility)| {
            let eta_minutes = eta::eta_minutes(origin, facility.location, speed);
            let breakdown = cost::assignment_cost(patient, facility, eta_minutes, rules);
            ScoredCandidate {
                index,
                cost: breakdown.total(),
                eta_minutes,
                facility_id: facility.facility_id.clone(),
            }
        })
        .collect();
    scored.sort_by(cost::preference_order);

    let mut problem = AssignmentProblem {
        costs: vec![scored_costs_by_index(&scored, facilities.len())],
        preference: vec![scored.iter().map(|candidate| candidate.index).collect()],
        demands: vec![patient.required_medical_resources.clone()],
        capacities: facilities
            .iter()
            .map(|facility| facility.medical_resources.clone())
            .collect(),
        excluded: BTreeSet::new(),
    };

    let primary = solver.solve(&problem, deadline);
    debug!(
        status = ?primary.status,
        objective = primary.objective,
        "primary assignment solve"
    );

    let Some(chosen) = primary.assignment.first().copied() else {
        let detail = match primary.status {
            SolverStatus::Infeasible => "assignment infeasible under capacity constraints",
            _ => "solver deadline expired before any assignment was found",
        };
        return TransferDecision::forfeit(
            ReasoningCode::NoFacilitiesAvailable,
            reasoning::no_facilities(detail),
        );
    };

    let chosen_eta = eta::eta_minutes(origin, facilities[chosen].location, speed);
    if !survival::within_window(chosen_eta, survival_window) {
        return TransferDecision::forfeit(
            ReasoningCode::DeadOnArrival,
            reasoning::dead_on_arrival(chosen_eta, survival_window.unwrap_or(0.0)),
        );
    }

    // Alternatives: re-solve with each chosen facility excluded, best first.
    let mut alternatives = Vec::new();
    let mut last_chosen = chosen;
    for _ in 0..rules.max_alternatives {
        problem.excluded.insert((0, last_chosen));
        let resolve = solver.solve(&problem, deadline);
        let Some(alternative) = resolve.assignment.first().copied() else {
            break;
        };
        let facility = &facilities[alternative];
        alternatives.push(Destination {
            facility_id: facility.facility_id.clone(),
            facility_name: facility.name.clone(),
            eta_minutes: eta::eta_minutes(origin, facility.location, speed),
        });
        last_chosen = alternative;
    }

    let destination_facility = &facilities[chosen];
    debug!(
        destination = %destination_facility.facility_id,
        eta_minutes = chosen_eta,
        alternatives = alternatives.len(),
        "destination selected"
    );

    TransferDecision::assignment(
        reasoning::transfer_optimal(chosen_eta),
        Destination {
            facility_id: destination_facility.facility_id.clone(),
            facility_name: destination_facility.name.clone(),
            eta_minutes: chosen_eta,
        },
        alternatives,
        primary.status,
    )
}

/// Re-index scored candidates back into a dense cost row.
fn scored_costs_by_index(scored: &[ScoredCandidate], facilities: usize) -> Vec<f64> {
    let mut costs = vec![0.0; facilities];
    for candidate in scored {
        costs[candidate.index] = candidate.cost;
    }
    costs
}
