//! Enumeration types for the transfer decision engine.
//!
//! Every stringly-typed field of the upstream triage pipeline is modeled
//! here as a closed enum. Legacy acuity tags from older triage exports are
//! accepted on deserialization through explicit aliases; everything else is
//! rejected by serde before it can reach the engine.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Acuity (SALT triage categories)
// ---------------------------------------------------------------------------

/// SALT triage category assigned to a patient.
///
/// The legacy tag set {`Critical`, `Severe`, `Minor`, `Deceased`,
/// `Undefined`} maps canonically onto SALT as {[`Immediate`], [`Delayed`],
/// [`Minimal`], [`Dead`], [`Delayed`]} and is accepted on input via serde
/// aliases. Serialization always emits the SALT name.
///
/// [`Immediate`]: Acuity::Immediate
/// [`Delayed`]: Acuity::Delayed
/// [`Minimal`]: Acuity::Minimal
/// [`Dead`]: Acuity::Dead
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Acuity {
    /// Not breathing even after opening the airway. No transport.
    #[serde(alias = "Deceased")]
    Dead,
    /// Unlikely to survive given resource constraints.
    Expectant,
    /// Likely to survive with immediate care.
    #[serde(alias = "Critical")]
    Immediate,
    /// Serious injuries, can wait for care.
    #[serde(alias = "Severe", alias = "Undefined")]
    Delayed,
    /// Minor injuries only.
    #[serde(alias = "Minor")]
    Minimal,
}

// ---------------------------------------------------------------------------
// Medical capabilities (closed set)
// ---------------------------------------------------------------------------

/// A specialized medical capability a facility may offer.
///
/// The set is closed: the cost model's stewardship and mismatch terms are
/// defined over exactly these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// General trauma center designation.
    TraumaCenter,
    /// Neurosurgical service.
    Neurosurgical,
    /// Orthopedic surgery.
    Orthopedic,
    /// Ophthalmology service.
    Ophthalmology,
    /// Burn unit.
    Burn,
    /// Pediatric specialty care.
    Pediatric,
    /// Obstetric care.
    Obstetric,
    /// Cardiac surgery.
    Cardiac,
    /// Thoracic surgery.
    Thoracic,
    /// Vascular surgery.
    Vascular,
    /// Ear, nose, and throat service.
    Ent,
    /// Hepatobiliary surgery.
    Hepatobiliary,
}

impl Capability {
    /// All capability keys, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::TraumaCenter,
        Self::Neurosurgical,
        Self::Orthopedic,
        Self::Ophthalmology,
        Self::Burn,
        Self::Pediatric,
        Self::Obstetric,
        Self::Cardiac,
        Self::Thoracic,
        Self::Vascular,
        Self::Ent,
        Self::Hepatobiliary,
    ];
}

// ---------------------------------------------------------------------------
// Medical resources (closed set)
// ---------------------------------------------------------------------------

/// A countable medical resource tracked for capacity constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicalResource {
    /// General ward bed.
    Ward,
    /// Intensive care unit bed.
    OrdinaryIcu,
    /// Operating room.
    OperatingRoom,
    /// Mechanical ventilator.
    Ventilator,
    /// Packed red blood cell unit.
    PrbcUnit,
    /// Isolation room.
    Isolation,
    /// Decontamination unit.
    DecontaminationUnit,
    /// CT scanner.
    CtScanner,
    /// Oxygen cylinder.
    OxygenCylinder,
    /// Interventional radiology suite.
    InterventionalRadiology,
}

impl MedicalResource {
    /// All resource keys, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Ward,
        Self::OrdinaryIcu,
        Self::OperatingRoom,
        Self::Ventilator,
        Self::PrbcUnit,
        Self::Isolation,
        Self::DecontaminationUnit,
        Self::CtScanner,
        Self::OxygenCylinder,
        Self::InterventionalRadiology,
    ];
}

// ---------------------------------------------------------------------------
// Incident dispatch modes
// ---------------------------------------------------------------------------

/// The incident context a transfer decision is made under.
///
/// MCI and PHE use single-destination assignment; MEDEVAC builds a
/// Role 1 -> Role 2 -> Role 3 evacuation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IncidentType {
    /// Mass casualty incident.
    #[serde(rename = "MCI")]
    Mci,
    /// Public health emergency.
    #[serde(rename = "PHE")]
    Phe,
    /// Medical evacuation under NATO doctrine.
    #[serde(rename = "MEDEVAC")]
    Medevac,
}

// ---------------------------------------------------------------------------
// Facility levels and NATO care roles
// ---------------------------------------------------------------------------

/// Healthcare facility level.
///
/// Levels are numeric on the wire: 1 is definitive care (NATO Role 3),
/// 2 is advanced trauma care (Role 2), 3 is forward stabilization (Role 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FacilityLevel {
    /// Level 1: definitive surgical care.
    One,
    /// Level 2: advanced trauma care.
    Two,
    /// Level 3: forward stabilization.
    Three,
}

impl FacilityLevel {
    /// The numeric value used on the wire.
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// The NATO care role delivered at this facility level.
    pub const fn care_role(self) -> CareRole {
        match self {
            Self::One => CareRole::Role3,
            Self::Two => CareRole::Role2,
            Self::Three => CareRole::Role1,
        }
    }
}

impl TryFrom<u8> for FacilityLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(format!("facility level must be 1, 2, or 3, got {other}")),
        }
    }
}

impl From<FacilityLevel> for u8 {
    fn from(level: FacilityLevel) -> Self {
        level.as_u8()
    }
}

/// NATO echelon of care, in evacuation order.
///
/// Role 1 is delivered at level-3 facilities, Role 2 at level-2, Role 3 at
/// level-1. The evacuation chain visits roles in ascending order, which
/// means facility levels in strictly descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CareRole {
    /// Initial stabilization and triage (Golden Hour target).
    #[serde(rename = "Role 1")]
    Role1,
    /// Advanced trauma and damage-control care.
    #[serde(rename = "Role 2")]
    Role2,
    /// Definitive surgical care.
    #[serde(rename = "Role 3")]
    Role3,
}

impl CareRole {
    /// Chain order: Role 1, then Role 2, then Role 3.
    pub const CHAIN: [Self; 3] = [Self::Role1, Self::Role2, Self::Role3];

    /// The facility level that delivers this role.
    pub const fn facility_level(self) -> FacilityLevel {
        match self {
            Self::Role1 => FacilityLevel::Three,
            Self::Role2 => FacilityLevel::Two,
            Self::Role3 => FacilityLevel::One,
        }
    }
}

impl core::fmt::Display for CareRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Role1 => write!(f, "Role 1"),
            Self::Role2 => write!(f, "Role 2"),
            Self::Role3 => write!(f, "Role 3"),
        }
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Transport mode used for ETA computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    /// Ground ambulance.
    #[default]
    Ground,
    /// Helicopter.
    Air,
}

// ---------------------------------------------------------------------------
// Decision outcome tags
// ---------------------------------------------------------------------------

/// The action a transfer decision commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DecisionAction {
    /// Move the patient (single destination or evacuation chain).
    Transfer,
    /// No transfer is made; the reasoning code explains why.
    Forfeit,
}

/// Machine-readable explanation for a transfer decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasoningCode {
    /// A three-hop NATO evacuation chain was built within the timeline.
    EvacuationChainOptimal,
    /// A single optimal destination assignment was found.
    TransferOptimal,
    /// Dead flag set, acuity Dead, or survival window already expired.
    PatientDeceased,
    /// The best assignment or chain exceeds the survival window.
    DeadOnArrival,
    /// Empty facility set, solver infeasibility, or structural input defect.
    NoFacilitiesAvailable,
    /// MEDEVAC cannot satisfy the Role 1/2/3 timeline.
    NoViableChain,
    /// The patient's location is absent.
    NoLocation,
}

impl ReasoningCode {
    /// The action implied by this code.
    pub const fn action(self) -> DecisionAction {
        match self {
            Self::EvacuationChainOptimal | Self::TransferOptimal => DecisionAction::Transfer,
            Self::PatientDeceased
            | Self::DeadOnArrival
            | Self::NoFacilitiesAvailable
            | Self::NoViableChain
            | Self::NoLocation => DecisionAction::Forfeit,
        }
    }
}

/// Status reported by the assignment solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    /// Proven-optimal solution.
    Optimal,
    /// A feasible incumbent found before the deadline expired.
    Feasible,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The deadline expired before any incumbent was found.
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_acuity_tags_map_to_salt() {
        let cases = [
            ("\"Critical\"", Acuity::Immediate),
            ("\"Severe\"", Acuity::Delayed),
            ("\"Minor\"", Acuity::Minimal),
            ("\"Deceased\"", Acuity::Dead),
            ("\"Undefined\"", Acuity::Delayed),
            ("\"Immediate\"", Acuity::Immediate),
            ("\"Expectant\"", Acuity::Expectant),
        ];
        for (json, expected) in cases {
            let parsed: Result<Acuity, _> = serde_json::from_str(json);
            assert_eq!(parsed.ok(), Some(expected), "parsing {json}");
        }
    }

    #[test]
    fn acuity_serializes_salt_names() {
        assert_eq!(
            serde_json::to_string(&Acuity::Immediate).ok().as_deref(),
            Some("\"Immediate\"")
        );
        assert_eq!(
            serde_json::to_string(&Acuity::Dead).ok().as_deref(),
            Some("\"Dead\"")
        );
    }

    #[test]
    fn unknown_acuity_rejected() {
        let parsed: Result<Acuity, _> = serde_json::from_str("\"Walking\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn capability_keys_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&Capability::TraumaCenter).ok().as_deref(),
            Some("\"trauma_center\"")
        );
        assert_eq!(
            serde_json::to_string(&Capability::Ent).ok().as_deref(),
            Some("\"ent\"")
        );
    }

    #[test]
    fn resource_keys_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&MedicalResource::OrdinaryIcu).ok().as_deref(),
            Some("\"ordinary_icu\"")
        );
        assert_eq!(
            serde_json::to_string(&MedicalResource::PrbcUnit).ok().as_deref(),
            Some("\"prbc_unit\"")
        );
    }

    #[test]
    fn incident_types_use_upper_names() {
        assert_eq!(
            serde_json::to_string(&IncidentType::Medevac).ok().as_deref(),
            Some("\"MEDEVAC\"")
        );
        let parsed: Result<IncidentType, _> = serde_json::from_str("\"MCI\"");
        assert_eq!(parsed.ok(), Some(IncidentType::Mci));
    }

    #[test]
    fn facility_level_is_numeric_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&FacilityLevel::Three).ok().as_deref(),
            Some("3")
        );
        let parsed: Result<FacilityLevel, _> = serde_json::from_str("1");
        assert_eq!(parsed.ok(), Some(FacilityLevel::One));
        let bad: Result<FacilityLevel, _> = serde_json::from_str("4");
        assert!(bad.is_err());
    }

    #[test]
    fn level_role_mapping_is_inverted() {
        assert_eq!(FacilityLevel::Three.care_role(), CareRole::Role1);
        assert_eq!(FacilityLevel::Two.care_role(), CareRole::Role2);
        assert_eq!(FacilityLevel::One.care_role(), CareRole::Role3);
        for role in CareRole::CHAIN {
            assert_eq!(role.facility_level().care_role(), role);
        }
    }

    #[test]
    fn care_role_serializes_with_space() {
        assert_eq!(
            serde_json::to_string(&CareRole::Role1).ok().as_deref(),
            Some("\"Role 1\"")
        );
    }

    #[test]
    fn reasoning_codes_imply_actions() {
        assert_eq!(
            ReasoningCode::TransferOptimal.action(),
            DecisionAction::Transfer
        );
        assert_eq!(
            ReasoningCode::EvacuationChainOptimal.action(),
            DecisionAction::Transfer
        );
        assert_eq!(
            ReasoningCode::DeadOnArrival.action(),
            DecisionAction::Forfeit
        );
        assert_eq!(ReasoningCode::NoLocation.action(), DecisionAction::Forfeit);
    }

    #[test]
    fn reasoning_code_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ReasoningCode::EvacuationChainOptimal)
                .ok()
                .as_deref(),
            Some("\"EVACUATION_CHAIN_OPTIMAL\"")
        );
        assert_eq!(
            serde_json::to_string(&ReasoningCode::NoFacilitiesAvailable)
                .ok()
                .as_deref(),
            Some("\"NO_FACILITIES_AVAILABLE\"")
        );
    }

    #[test]
    fn solver_status_upper_names() {
        assert_eq!(
            serde_json::to_string(&SolverStatus::Optimal).ok().as_deref(),
            Some("\"OPTIMAL\"")
        );
        assert_eq!(
            serde_json::to_string(&SolverStatus::Infeasible).ok().as_deref(),
            Some("\"INFEASIBLE\"")
        );
    }
}
