//! Constraint-based transfer decision engine for triaged patients.
//!
//! Given one patient, a set of candidate facilities, and an incident type,
//! the engine produces a deterministic [`TransferDecision`]: a
//! single-destination assignment (MCI/PHE), a NATO Role 1 -> 2 -> 3
//! evacuation chain (MEDEVAC), or an explicit forfeit with a reasoning
//! code. Calls are pure and reentrant: the engine owns no mutable state
//! and never performs I/O.
//!
//! # Modules
//!
//! - [`rules`] -- Tunable weights, penalties, speeds, and timeline budgets
//! - [`eta`] -- Haversine distance and travel-time estimation
//! - [`feasibility`] -- Capability and resource sufficiency predicates
//! - [`cost`] -- The four-term scalar cost model and tie-break ordering
//! - [`survival`] -- Survival window derivation and viability gate
//! - [`solver`] -- Binary assignment solver port and branch-and-bound
//!   backend
//! - [`optimizer`] -- MCI/PHE single-destination optimization with ranked
//!   alternatives
//! - [`chain`] -- MEDEVAC evacuation chain construction
//! - [`reasoning`] -- Deterministic reasoning text templates
//! - [`engine`] -- The [`TransferEngine`] orchestrator
//!
//! [`TransferDecision`]: medevac_types::TransferDecision

pub mod chain;
pub mod cost;
pub mod engine;
pub mod eta;
pub mod feasibility;
pub mod optimizer;
pub mod reasoning;
pub mod rules;
pub mod solver;
pub mod survival;

pub use engine::{DecideOptions, TransferEngine};
pub use rules::{Rules, RulesError};
pub use solver::{AssignmentProblem, AssignmentSolution, AssignmentSolver, BranchAndBound};
