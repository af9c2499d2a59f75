//! Property-based invariants over randomized patients and facility sets.
//!
//! Every generated input exercises the full public `decide` path; the
//! properties assert the structural contract rather than specific
//! outcomes: chain ordering and accumulation, facility uniqueness,
//! determinism, the deceased short-circuit, survival monotonicity, and the
//! soft capability-penalty floor.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use medevac_engine::{DecideOptions, Rules, TransferEngine, cost};
use medevac_types::{
    Acuity, Capability, Facility, FacilityId, FacilityLevel, GeoPoint, IncidentType,
    MedicalResource, Patient, PatientId, ReasoningCode, TransferDecision,
};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).single().unwrap()
}

fn arb_acuity() -> impl Strategy<Value = Acuity> {
    prop_oneof![
        Just(Acuity::Dead),
        Just(Acuity::Expectant),
        Just(Acuity::Immediate),
        Just(Acuity::Delayed),
        Just(Acuity::Minimal),
    ]
}

fn arb_point() -> impl Strategy<Value = GeoPoint> {
    (-0.5f64..0.5, -0.5f64..0.5).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

fn arb_capabilities() -> impl Strategy<Value = BTreeMap<Capability, bool>> {
    proptest::collection::btree_map(
        prop_oneof![
            Just(Capability::TraumaCenter),
            Just(Capability::Burn),
            Just(Capability::Cardiac),
            Just(Capability::Neurosurgical),
            Just(Capability::Pediatric),
        ],
        any::<bool>(),
        0..4,
    )
}

fn arb_resources(max: u32) -> impl Strategy<Value = BTreeMap<MedicalResource, u32>> {
    proptest::collection::btree_map(
        prop_oneof![
            Just(MedicalResource::Ward),
            Just(MedicalResource::OrdinaryIcu),
            Just(MedicalResource::Ventilator),
        ],
        0..=max,
        0..3,
    )
}

prop_compose! {
    fn arb_patient()(
        acuity in arb_acuity(),
        location in arb_point(),
        window_minutes in prop_oneof![Just(None), (30i64..600).prop_map(Some)],
        capabilities in arb_capabilities(),
        resources in arb_resources(2),
        deceased in any::<bool>(),
    ) -> Patient {
        Patient {
            patient_id: PatientId::new("P-PROP"),
            name: String::new(),
            acuity,
            location: Some(location),
            predicted_death_timestamp: window_minutes
                .map(|minutes| now() + Duration::minutes(minutes)),
            required_medical_capabilities: capabilities,
            required_medical_resources: resources,
            deceased,
        }
    }
}

fn arb_facility(index: usize) -> impl Strategy<Value = Facility> {
    (
        arb_point(),
        1u8..=3,
        arb_capabilities(),
        arb_resources(20),
    )
        .prop_map(move |(location, level, capabilities, medical_resources)| Facility {
            facility_id: FacilityId::new(format!("F-{index:02}")),
            name: format!("Facility {index:02}"),
            level: FacilityLevel::try_from(level).unwrap(),
            location,
            capabilities,
            medical_resources,
        })
}

fn arb_facilities() -> impl Strategy<Value = Vec<Facility>> {
    (1usize..=6).prop_flat_map(|count| {
        (0..count).map(arb_facility).collect::<Vec<_>>()
    })
}

fn decide(
    patient: &Patient,
    facilities: &[Facility],
    incident_type: IncidentType,
) -> TransferDecision {
    TransferEngine::default().decide(
        patient,
        facilities,
        incident_type,
        now(),
        &DecideOptions::default(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn deceased_always_forfeits_patient_deceased(
        patient in arb_patient(),
        facilities in arb_facilities(),
        use_flag in any::<bool>(),
        incident_type in prop_oneof![
            Just(IncidentType::Mci),
            Just(IncidentType::Phe),
            Just(IncidentType::Medevac),
        ],
    ) {
        let mut patient = patient;
        if use_flag {
            patient.deceased = true;
        } else {
            patient.acuity = Acuity::Dead;
        }
        let decision = decide(&patient, &facilities, incident_type);
        prop_assert_eq!(decision.reasoning_code(), ReasoningCode::PatientDeceased);
    }

    #[test]
    fn identical_inputs_yield_identical_output(
        patient in arb_patient(),
        facilities in arb_facilities(),
        incident_type in prop_oneof![Just(IncidentType::Mci), Just(IncidentType::Medevac)],
    ) {
        let first = decide(&patient, &facilities, incident_type);
        let second = decide(&patient, &facilities, incident_type);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn chains_accumulate_and_descend(
        patient in arb_patient(),
        facilities in arb_facilities(),
    ) {
        let decision = decide(&patient, &facilities, IncidentType::Medevac);
        if let TransferDecision::Evacuation(evacuation) = decision {
            // Levels strictly descending 3 -> 2 -> 1.
            let levels: Vec<u8> = evacuation
                .evacuation_chain
                .iter()
                .map(|hop| hop.level.as_u8())
                .collect();
            prop_assert_eq!(levels, vec![3, 2, 1]);

            // Cumulative times are the running sum of hop ETAs.
            let mut sum = 0.0;
            for hop in &evacuation.evacuation_chain {
                sum += hop.eta_minutes;
                prop_assert!((hop.cumulative_time - sum).abs() < 1e-9);
            }
            prop_assert!((evacuation.total_time_minutes - sum).abs() < 1e-9);

            // No facility appears twice.
            let mut ids: Vec<&str> = evacuation
                .evacuation_chain
                .iter()
                .map(|hop| hop.facility_id.as_str())
                .collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), 3);
        }
    }

    #[test]
    fn destination_and_alternatives_are_distinct(
        patient in arb_patient(),
        facilities in arb_facilities(),
    ) {
        let decision = decide(&patient, &facilities, IncidentType::Mci);
        if let TransferDecision::Assignment(assignment) = decision {
            let mut ids: Vec<&str> = assignment
                .alternatives
                .iter()
                .map(|alt| alt.facility_id.as_str())
                .chain([assignment.destination.facility_id.as_str()])
                .collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), total);
            prop_assert!(assignment.alternatives.len() <= 3);
        }
    }

    #[test]
    fn widening_survival_window_preserves_transfers(
        patient in arb_patient(),
        facilities in arb_facilities(),
        incident_type in prop_oneof![Just(IncidentType::Mci), Just(IncidentType::Medevac)],
    ) {
        prop_assume!(patient.predicted_death_timestamp.is_some());
        let mut patient = patient;
        patient.deceased = false;
        if patient.acuity == Acuity::Dead {
            patient.acuity = Acuity::Immediate;
        }
        let narrow = decide(&patient, &facilities, incident_type);
        prop_assume!(narrow.is_transfer());

        let mut widened = patient.clone();
        widened.predicted_death_timestamp = patient
            .predicted_death_timestamp
            .map(|death| death + Duration::hours(12));
        let wide = decide(&widened, &facilities, incident_type);
        prop_assert!(wide.is_transfer());
    }

    #[test]
    fn missing_capability_floors_the_cost(
        patient in arb_patient(),
        facility in arb_facility(0),
        eta in 0.0f64..300.0,
    ) {
        let rules = Rules::default();
        let breakdown = cost::assignment_cost(&patient, &facility, eta, &rules);
        let missing = patient
            .required_capabilities()
            .filter(|capability| !facility.has_capability(*capability))
            .count();
        if missing > 0 {
            prop_assert!(breakdown.total() >= rules.capability_mismatch_penalty);
        }

        // Dropping every requirement never increases the cost.
        let mut relaxed = patient.clone();
        relaxed.required_medical_capabilities.clear();
        let relaxed_breakdown = cost::assignment_cost(&relaxed, &facility, eta, &rules);
        prop_assert!(relaxed_breakdown.total() <= breakdown.total() + 1e-9);
    }
}
