//! Capability and resource feasibility predicates.
//!
//! These predicates never remove a facility from the MCI/PHE candidate set
//! -- the cost model's soft penalties and the solver's capacity rows do
//! that. The chain builder and the cost model use them to prefer compliant
//! facilities and to price non-compliance.

use std::collections::BTreeMap;

use medevac_types::{Capability, Facility, MedicalResource, Patient};

/// Whether the facility offers every capability the patient requires.
pub fn capabilities_match(patient: &Patient, facility: &Facility) -> bool {
    patient
        .required_capabilities()
        .all(|capability| facility.has_capability(capability))
}

/// Required capabilities the facility lacks, in key order.
pub fn missing_capabilities(patient: &Patient, facility: &Facility) -> Vec<Capability> {
    patient
        .required_capabilities()
        .filter(|capability| !facility.has_capability(*capability))
        .collect()
}

/// Whether the facility can cover every required resource count.
pub fn resources_sufficient(patient: &Patient, facility: &Facility) -> bool {
    patient
        .required_medical_resources
        .iter()
        .filter(|(_, required)| **required > 0)
        .all(|(resource, required)| facility.resource_capacity(*resource) >= *required)
}

/// Shortfall per required resource, in key order. Empty when sufficient.
pub fn resource_deficits(
    patient: &Patient,
    facility: &Facility,
) -> BTreeMap<MedicalResource, u32> {
    patient
        .required_medical_resources
        .iter()
        .filter_map(|(resource, required)| {
            let capacity = facility.resource_capacity(*resource);
            (*required > capacity).then(|| (*resource, *required - capacity))
        })
        .collect()
}
