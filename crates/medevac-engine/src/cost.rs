//! The scalar cost model for one (patient, facility) assignment.
//!
//! Four terms share a single abstract cost axis:
//!
//! 1. **Time cost** -- ETA minutes x acuity weight. Dominates for
//!    high-acuity patients.
//! 2. **Capability mismatch** -- a near-prohibitive penalty per required
//!    capability the facility lacks.
//! 3. **Stewardship** -- scarcity penalties for capabilities the facility
//!    offers but the patient does not need, so scarce tertiary capacity is
//!    preserved for patients who need it.
//! 4. **Resource stress and deficit** -- a quadratic stress term per
//!    required resource, plus one flat penalty when anything is short.
//!
//! Ties in total cost break by lower ETA, then lexicographically smaller
//! facility id. The ordering is part of the engine contract: it is what
//! makes decisions deterministic across solver backends.

use std::cmp::Ordering;

use medevac_types::{Facility, FacilityId, Patient};

use crate::feasibility;
use crate::rules::Rules;

/// Itemized cost of assigning one patient to one facility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    /// ETA minutes weighted by acuity.
    pub time_cost: f64,
    /// Penalty for required capabilities the facility lacks.
    pub capability_penalty: f64,
    /// Scarcity penalties for unneeded capabilities the facility offers.
    pub stewardship_penalty: f64,
    /// Quadratic utilization stress over required resources.
    pub resource_stress: f64,
    /// Flat penalty when any required resource is short.
    pub deficit_penalty: f64,
}

impl CostBreakdown {
    /// The scalar objective value: the plain sum of all terms.
    pub fn total(&self) -> f64 {
        self.time_cost
            + self.capability_penalty
            + self.stewardship_penalty
            + self.resource_stress
            + self.deficit_penalty
    }
}

/// Price the assignment of `patient` to `facility` with travel time
/// `eta_minutes`.
pub fn assignment_cost(
    patient: &Patient,
    facility: &Facility,
    eta_minutes: f64,
    rules: &Rules,
) -> CostBreakdown {
    let time_cost = eta_minutes * rules.acuity_weight(patient.acuity);

    let missing = feasibility::missing_capabilities(patient, facility);
    #[allow(clippy::cast_precision_loss)]
    let capability_penalty = rules.capability_mismatch_penalty * missing.len() as f64;

    let stewardship_penalty = facility
        .offered_capabilities()
        .filter(|capability| !patient.requires_capability(*capability))
        .map(|capability| rules.scarcity_penalty(capability))
        .sum();

    let resource_stress = patient
        .required_medical_resources
        .iter()
        .filter(|(_, required)| **required > 0)
        .map(|(resource, required)| {
            rules.resource_stress(*required, facility.resource_capacity(*resource))
        })
        .sum();

    let deficit_penalty = if feasibility::resources_sufficient(patient, facility) {
        0.0
    } else {
        rules.resource_deficit_penalty
    };

    CostBreakdown {
        time_cost,
        capability_penalty,
        stewardship_penalty,
        resource_stress,
        deficit_penalty,
    }
}

/// A scored candidate, ready for deterministic ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// Index of the facility in the caller's slice.
    pub index: usize,
    /// Total assignment cost.
    pub cost: f64,
    /// Travel time in minutes.
    pub eta_minutes: f64,
    /// Facility identifier, the final tie-break key.
    pub facility_id: FacilityId,
}

/// The contractual candidate ordering: ascending cost, then ascending ETA,
/// then lexicographic facility id.
pub fn preference_order(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    a.cost
        .total_cmp(&b.cost)
        .then(a.eta_minutes.total_cmp(&b.eta_minutes))
        .then_with(|| a.facility_id.cmp(&b.facility_id))
}
