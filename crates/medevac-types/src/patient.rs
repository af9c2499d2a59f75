//! The patient record consumed by the decision engine.
//!
//! The upstream triage pipeline produces much richer records (vitals,
//! injuries, demographics, status tracking); the engine consumes only the
//! fields modeled here and serde ignores the rest. Requirement maps may be
//! partial: a missing capability key means "not required" and a missing
//! resource key means "zero units required".

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{Acuity, Capability, MedicalResource};
use crate::geo::GeoPoint;
use crate::ids::PatientId;

/// A triaged patient awaiting a transfer decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Opaque identifier minted by the triage pipeline.
    pub patient_id: PatientId,

    /// Display name, used only in reasoning text.
    #[serde(default)]
    pub name: String,

    /// SALT triage category.
    pub acuity: Acuity,

    /// Last known position, if any. Absent position forfeits the decision.
    #[serde(default)]
    pub location: Option<GeoPoint>,

    /// Predicted time of death as POSIX seconds on the wire. Absent means
    /// no hard deadline.
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub predicted_death_timestamp: Option<DateTime<Utc>>,

    /// Capabilities the receiving facility must offer (`true` = required).
    #[serde(default)]
    pub required_medical_capabilities: BTreeMap<Capability, bool>,

    /// Units of each resource the patient will consume on arrival.
    #[serde(default)]
    pub required_medical_resources: BTreeMap<MedicalResource, u32>,

    /// Set when the patient has been confirmed dead.
    #[serde(default)]
    pub deceased: bool,
}

impl Patient {
    /// Whether the patient requires the given capability.
    pub fn requires_capability(&self, capability: Capability) -> bool {
        self.required_medical_capabilities
            .get(&capability)
            .copied()
            .unwrap_or(false)
    }

    /// Units of the given resource the patient requires (0 if unlisted).
    pub fn required_units(&self, resource: MedicalResource) -> u32 {
        self.required_medical_resources
            .get(&resource)
            .copied()
            .unwrap_or(0)
    }

    /// Iterate over the capabilities flagged as required, in key order.
    pub fn required_capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.required_medical_capabilities
            .iter()
            .filter(|(_, required)| **required)
            .map(|(capability, _)| *capability)
    }
}
