//! MEDEVAC evacuation chain builder.
//!
//! Builds the NATO Role 1 -> Role 2 -> Role 3 progression as a sequential
//! greedy construction: at each role tier, candidates at the matching
//! facility level are discarded unless they fit the role's cumulative time
//! budget, the survivors are scored with the full cost model, and the
//! cheapest (ties: lower ETA, then facility id) becomes the next hop. The
//! origin advances to each chosen facility and a facility never appears
//! twice.
//!
//! All three hops are mandatory. Budgets are cumulative: 60 minutes to
//! Role 1 (Golden Hour), 120 to Role 2 (Damage Control), and the survival
//! window to Role 3.

use medevac_types::{
    CareRole, EvacuationHop, Facility, GeoPoint, NatoCompliance, Patient, ReasoningCode,
    TransferDecision, TransportMode,
};
use tracing::debug;

use crate::cost::{self, ScoredCandidate};
use crate::eta;
use crate::reasoning;
use crate::rules::Rules;
use crate::survival;

/// Build the evacuation chain for a MEDEVAC incident.
///
/// `origin` is the patient's position (already validated by the
/// orchestrator); `survival_window` of `None` means no deadline.
pub fn build_chain(
    patient: &Patient,
    facilities: &[Facility],
    origin: GeoPoint,
    survival_window: Option<f64>,
    mode: TransportMode,
    rules: &Rules,
) -> TransferDecision {
    let speed = rules.speed_kmh(mode);

    let mut remaining = vec![true; facilities.len()];
    let mut position = origin;
    let mut cumulative = 0.0;
    let mut chain: Vec<EvacuationHop> = Vec::with_capacity(CareRole::CHAIN.len());

    for role in CareRole::CHAIN {
        let budget = match role {
            CareRole::Role1 => Some(rules.role1_budget_minutes),
            CareRole::Role2 => Some(rules.role2_budget_minutes),
            CareRole::Role3 => survival_window,
        };

        let best = facilities
            .iter()
            .enumerate()
            .filter(|(index, facility)| {
                remaining[*index] && facility.level == role.facility_level()
            })
            .filter_map(|(index, facility)| {
                let eta_minutes = eta::eta_minutes(position, facility.location, speed);
                survival::within_window(cumulative + eta_minutes, budget).then(|| {
                    let breakdown = cost::assignment_cost(patient, facility, eta_minutes, rules);
                    ScoredCandidate {
                        index,
                        cost: breakdown.total(),
                        eta_minutes,
                        facility_id: facility.facility_id.clone(),
                    }
                })
            })
            .min_by(|a, b| cost::preference_order(a, b));

        let Some(candidate) = best else {
            debug!(%role, cumulative, "no facility fits the role budget");
            return TransferDecision::forfeit(
                ReasoningCode::NoViableChain,
                reasoning::no_viable_chain(role),
            );
        };

        let facility = &facilities[candidate.index];
        cumulative += candidate.eta_minutes;
        chain.push(EvacuationHop {
            role,
            level: facility.level,
            facility_id: facility.facility_id.clone(),
            facility_name: facility.name.clone(),
            eta_minutes: candidate.eta_minutes,
            cumulative_time: cumulative,
            timeline_compliance: survival::within_window(cumulative, budget),
        });
        position = facility.location;
        remaining[candidate.index] = false;
    }

    // Role budgets already bound each hop; this is the terminal guard the
    // contract requires on the completed chain.
    if !survival::within_window(cumulative, survival_window) {
        return TransferDecision::forfeit(
            ReasoningCode::DeadOnArrival,
            reasoning::dead_on_arrival(cumulative, survival_window.unwrap_or(0.0)),
        );
    }

    let compliance = NatoCompliance {
        role1_compliant: role_compliant(&chain, CareRole::Role1),
        role2_compliant: role_compliant(&chain, CareRole::Role2),
        survival_compliant: survival::within_window(cumulative, survival_window),
    };
    debug!(
        hops = chain.len(),
        total_minutes = cumulative,
        "evacuation chain constructed"
    );

    TransferDecision::evacuation(
        reasoning::evacuation_chain(chain.len(), cumulative),
        chain,
        cumulative,
        survival_window,
        compliance,
    )
}

/// Whether the hop serving `role` arrived within its budget.
fn role_compliant(chain: &[EvacuationHop], role: CareRole) -> bool {
    chain
        .iter()
        .any(|hop| hop.role == role && hop.timeline_compliance)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use medevac_types::{Acuity, FacilityId, FacilityLevel, PatientId};

    use super::*;

    fn make_patient() -> Patient {
        Patient {
            patient_id: PatientId::new("P-1"),
            name: String::from("Casualty"),
            acuity: Acuity::Immediate,
            location: Some(GeoPoint::new(0.0, 0.0)),
            predicted_death_timestamp: None,
            required_medical_capabilities: BTreeMap::new(),
            required_medical_resources: BTreeMap::new(),
            deceased: false,
        }
    }

    fn make_facility(id: &str, level: FacilityLevel, longitude: f64) -> Facility {
        Facility {
            facility_id: FacilityId::new(id),
            name: format!("Facility {id}"),
            level,
            location: GeoPoint::new(0.0, longitude),
            capabilities: BTreeMap::new(),
            medical_resources: BTreeMap::new(),
        }
    }

    fn standard_set() -> Vec<Facility> {
        vec![
            make_facility("F-L3", FacilityLevel::Three, 0.10),
            make_facility("F-L2", FacilityLevel::Two, 0.40),
            make_facility("F-L1", FacilityLevel::One, 1.00),
        ]
    }

    fn run(facilities: &[Facility], survival_window: Option<f64>) -> TransferDecision {
        let patient = make_patient();
        build_chain(
            &patient,
            facilities,
            patient.location.unwrap(),
            survival_window,
            TransportMode::Ground,
            &Rules::default(),
        )
    }

    #[test]
    fn chain_visits_levels_descending() {
        let decision = run(&standard_set(), Some(180.0));
        let TransferDecision::Evacuation(evacuation) = decision else {
            panic!("expected an evacuation decision");
        };

        let levels: Vec<u8> = evacuation
            .evacuation_chain
            .iter()
            .map(|hop| hop.level.as_u8())
            .collect();
        assert_eq!(levels, vec![3, 2, 1]);
        let roles: Vec<CareRole> = evacuation
            .evacuation_chain
            .iter()
            .map(|hop| hop.role)
            .collect();
        assert_eq!(roles, CareRole::CHAIN.to_vec());
    }

    #[test]
    fn cumulative_times_accumulate_hop_etas() {
        let decision = run(&standard_set(), Some(180.0));
        let TransferDecision::Evacuation(evacuation) = decision else {
            panic!("expected an evacuation decision");
        };

        let mut expected = 0.0;
        for hop in &evacuation.evacuation_chain {
            expected += hop.eta_minutes;
            assert!((hop.cumulative_time - expected).abs() < 1e-9);
            assert!(hop.timeline_compliance);
        }
        assert!((evacuation.total_time_minutes - expected).abs() < 1e-9);
        assert!(evacuation.nato_compliance.role1_compliant);
        assert!(evacuation.nato_compliance.role2_compliant);
        assert!(evacuation.nato_compliance.survival_compliant);
    }

    #[test]
    fn unreachable_role2_forfeits_no_viable_chain() {
        let mut facilities = standard_set();
        // ~222 km from the Role 1 stop: ETA alone blows the 120 min budget.
        facilities[1] = make_facility("F-L2", FacilityLevel::Two, 2.00);
        let decision = run(&facilities, Some(180.0));

        assert_eq!(decision.reasoning_code(), ReasoningCode::NoViableChain);
        let TransferDecision::Forfeit(forfeit) = decision else {
            panic!("expected a forfeit decision");
        };
        assert!(forfeit.evacuation_chain.is_empty());
    }

    #[test]
    fn missing_tier_forfeits_no_viable_chain() {
        let facilities = vec![
            make_facility("F-L3", FacilityLevel::Three, 0.10),
            make_facility("F-L1", FacilityLevel::One, 0.50),
        ];
        let decision = run(&facilities, None);
        assert_eq!(decision.reasoning_code(), ReasoningCode::NoViableChain);
    }

    #[test]
    fn tight_survival_window_cuts_role3() {
        // Role 1 and Role 2 fit their fixed budgets, but the survival
        // window expires before any Role 3 facility is reachable.
        let decision = run(&standard_set(), Some(60.0));
        assert_eq!(decision.reasoning_code(), ReasoningCode::NoViableChain);
    }

    #[test]
    fn no_deadline_allows_distant_definitive_care() {
        let mut facilities = standard_set();
        facilities[2] = make_facility("F-L1", FacilityLevel::One, 5.00);
        let decision = run(&facilities, None);

        let TransferDecision::Evacuation(evacuation) = decision else {
            panic!("expected an evacuation decision");
        };
        assert!(evacuation.survival_window_minutes.is_none());
        assert!(evacuation.nato_compliance.survival_compliant);
    }

    #[test]
    fn each_facility_used_at_most_once() {
        // Two tiers share a co-located pair; the same facility must not
        // serve two roles.
        let facilities = vec![
            make_facility("F-A", FacilityLevel::Three, 0.10),
            make_facility("F-B", FacilityLevel::Two, 0.10),
            make_facility("F-C", FacilityLevel::One, 0.20),
        ];
        let decision = run(&facilities, None);

        let TransferDecision::Evacuation(evacuation) = decision else {
            panic!("expected an evacuation decision");
        };
        let mut ids: Vec<&str> = evacuation
            .evacuation_chain
            .iter()
            .map(|hop| hop.facility_id.as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn closer_tier_candidate_preferred() {
        let facilities = vec![
            make_facility("F-L3-FAR", FacilityLevel::Three, 0.30),
            make_facility("F-L3-NEAR", FacilityLevel::Three, 0.10),
            make_facility("F-L2", FacilityLevel::Two, 0.40),
            make_facility("F-L1", FacilityLevel::One, 1.00),
        ];
        let decision = run(&facilities, None);

        let TransferDecision::Evacuation(evacuation) = decision else {
            panic!("expected an evacuation decision");
        };
        assert_eq!(
            evacuation.evacuation_chain[0].facility_id.as_str(),
            "F-L3-NEAR"
        );
    }
}
