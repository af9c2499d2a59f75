//! Shared type definitions for the MEDEVAC transfer decision engine.
//!
//! This crate is the single source of truth for the data shapes exchanged
//! with the triage pipeline and the facility registry. It carries no
//! decision logic: predicates, costs, and the solver live in
//! `medevac-engine`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe opaque-string identifiers
//! - [`enums`] -- Closed enumerations (acuity, capabilities, resources,
//!   incident types, reasoning codes)
//! - [`geo`] -- WGS-84 coordinate point
//! - [`patient`] -- Triaged patient record
//! - [`facility`] -- Healthcare facility record
//! - [`decision`] -- The [`TransferDecision`] output family
//!
//! [`TransferDecision`]: decision::TransferDecision

pub mod decision;
pub mod enums;
pub mod facility;
pub mod geo;
pub mod ids;
pub mod patient;

// Re-export all public types at crate root for convenience.
pub use decision::{
    AssignmentDecision, Destination, EvacuationDecision, EvacuationHop, ForfeitDecision,
    NatoCompliance, TransferDecision,
};
pub use enums::{
    Acuity, Capability, CareRole, DecisionAction, FacilityLevel, IncidentType, MedicalResource,
    ReasoningCode, SolverStatus, TransportMode,
};
pub use facility::Facility;
pub use geo::GeoPoint;
pub use ids::{FacilityId, PatientId};
pub use patient::Patient;
