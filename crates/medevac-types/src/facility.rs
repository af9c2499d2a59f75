//! The healthcare facility record consumed by the decision engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{Capability, FacilityLevel, MedicalResource};
use crate::geo::GeoPoint;
use crate::ids::FacilityId;

/// A candidate healthcare facility.
///
/// Resource counts are a snapshot of remaining capacity at decision time.
/// The engine never mutates them and never reserves them across decisions;
/// reservation semantics belong to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Opaque identifier from the facility registry.
    pub facility_id: FacilityId,

    /// Display name, carried into decision outputs.
    #[serde(default)]
    pub name: String,

    /// Care level (1 = definitive, 2 = advanced trauma, 3 = forward).
    pub level: FacilityLevel,

    /// Facility position in decimal degrees.
    pub location: GeoPoint,

    /// Capabilities on offer (`true` = available). Partial maps are
    /// allowed; a missing key means the capability is absent.
    #[serde(default)]
    pub capabilities: BTreeMap<Capability, bool>,

    /// Remaining units of each tracked resource.
    #[serde(default)]
    pub medical_resources: BTreeMap<MedicalResource, u32>,
}

impl Facility {
    /// Whether the facility offers the given capability.
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.get(&capability).copied().unwrap_or(false)
    }

    /// Remaining units of the given resource (0 if unlisted).
    pub fn resource_capacity(&self, resource: MedicalResource) -> u32 {
        self.medical_resources
            .get(&resource)
            .copied()
            .unwrap_or(0)
    }

    /// Iterate over the capabilities the facility offers, in key order.
    pub fn offered_capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities
            .iter()
            .filter(|(_, available)| **available)
            .map(|(capability, _)| *capability)
    }
}
