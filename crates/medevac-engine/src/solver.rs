//! Binary assignment solver: the port and its default backend.
//!
//! The engine depends only on the [`AssignmentSolver`] trait -- a binary
//! ILP with a linear objective, one assignment row per patient, per-facility
//! resource capacity rows, and a caller-supplied exclusion set (used to
//! enumerate alternatives by re-solving). Any correct backend satisfies the
//! contract; [`BranchAndBound`] is the built-in one, exact at the scale the
//! engine sees and dependency-free.
//!
//! The problem is formulated over a patient *set* even though the public
//! engine API is single-patient, so batch assignment is a pure
//! generalization rather than a rewrite.
//!
//! # Determinism
//!
//! The backend explores facilities in each patient's preference order and
//! replaces the incumbent only on strictly lower objective. The first
//! incumbent found among equal-cost solutions therefore wins, which makes
//! the caller's preference order (ascending cost, then ETA, then facility
//! id) the effective tie-break -- identical inputs always yield identical
//! assignments regardless of timing.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use medevac_types::{MedicalResource, SolverStatus};

/// A binary patient-to-facility assignment problem.
///
/// Indices refer to the caller's patient and facility slices. Constraints:
///
/// - each patient is assigned to exactly one facility;
/// - for every facility and resource, the summed demand of assigned
///   patients must not exceed capacity;
/// - excluded (patient, facility) pairs are never assigned.
#[derive(Debug, Clone)]
pub struct AssignmentProblem {
    /// `costs[p][f]` is the objective coefficient of assigning patient `p`
    /// to facility `f`. All values must be finite.
    pub costs: Vec<Vec<f64>>,
    /// Per patient, facility indices in preferred exploration order.
    pub preference: Vec<Vec<usize>>,
    /// Per patient, units of each resource the patient consumes.
    pub demands: Vec<BTreeMap<MedicalResource, u32>>,
    /// Per facility, remaining units of each resource.
    pub capacities: Vec<BTreeMap<MedicalResource, u32>>,
    /// Assignments forbidden outright.
    pub excluded: BTreeSet<(usize, usize)>,
}

impl AssignmentProblem {
    /// Number of patients in the problem.
    pub fn num_patients(&self) -> usize {
        self.costs.len()
    }

    fn is_excluded(&self, patient: usize, facility: usize) -> bool {
        self.excluded.contains(&(patient, facility))
    }
}

/// The result of one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentSolution {
    /// Chosen facility index per patient. Empty unless the status is
    /// [`SolverStatus::Optimal`] or [`SolverStatus::Feasible`].
    pub assignment: Vec<usize>,
    /// Objective value of the assignment (0 when there is none).
    pub objective: f64,
    /// Outcome of the search.
    pub status: SolverStatus,
}

impl AssignmentSolution {
    fn no_solution(status: SolverStatus) -> Self {
        Self {
            assignment: Vec::new(),
            objective: 0.0,
            status,
        }
    }
}

/// A backend able to solve [`AssignmentProblem`]s under a wall-clock
/// deadline.
///
/// On deadline expiry a backend must report [`SolverStatus::Feasible`] with
/// the best incumbent when one exists, or [`SolverStatus::Unknown`] when
/// none does.
pub trait AssignmentSolver {
    /// Solve the problem, spending at most `deadline` of wall-clock time.
    fn solve(&self, problem: &AssignmentProblem, deadline: Duration) -> AssignmentSolution;
}

/// Exhaustive depth-first branch-and-bound over patient assignments.
///
/// The bound is admissible: the cost of a partial assignment plus, for each
/// unassigned patient, the cheapest non-excluded facility (ignoring
/// capacity). Nodes whose bound meets the incumbent are pruned.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBound;

impl BranchAndBound {
    /// Create the default backend.
    pub const fn new() -> Self {
        Self
    }
}

impl AssignmentSolver for BranchAndBound {
    fn solve(&self, problem: &AssignmentProblem, deadline: Duration) -> AssignmentSolution {
        let patients = problem.num_patients();
        if patients == 0 {
            return AssignmentSolution {
                assignment: Vec::new(),
                objective: 0.0,
                status: SolverStatus::Optimal,
            };
        }

        // Per-patient cheapest admissible cost, ignoring capacity. A patient
        // with no admissible facility at all makes the problem infeasible
        // before any search.
        let mut cheapest = Vec::with_capacity(patients);
        for patient in 0..patients {
            let min = problem.preference[patient]
                .iter()
                .filter(|facility| !problem.is_excluded(patient, **facility))
                .map(|facility| problem.costs[patient][*facility])
                .min_by(f64::total_cmp);
            match min {
                Some(cost) => cheapest.push(cost),
                None => return AssignmentSolution::no_solution(SolverStatus::Infeasible),
            }
        }

        // remaining_bound[p] = sum of cheapest costs for patients p..end.
        let mut remaining_bound = vec![0.0; patients + 1];
        for patient in (0..patients).rev() {
            remaining_bound[patient] = remaining_bound[patient + 1] + cheapest[patient];
        }

        let mut search = Search {
            problem,
            deadline_at: Instant::now() + deadline,
            timed_out: false,
            usage: vec![BTreeMap::new(); problem.capacities.len()],
            partial: Vec::with_capacity(patients),
            incumbent: None,
            remaining_bound,
        };
        search.descend(0, 0.0);

        match (search.incumbent, search.timed_out) {
            (Some((assignment, objective)), false) => AssignmentSolution {
                assignment,
                objective,
                status: SolverStatus::Optimal,
            },
            (Some((assignment, objective)), true) => AssignmentSolution {
                assignment,
                objective,
                status: SolverStatus::Feasible,
            },
            (None, false) => AssignmentSolution::no_solution(SolverStatus::Infeasible),
            (None, true) => AssignmentSolution::no_solution(SolverStatus::Unknown),
        }
    }
}

struct Search<'a> {
    problem: &'a AssignmentProblem,
    deadline_at: Instant,
    timed_out: bool,
    usage: Vec<BTreeMap<MedicalResource, u32>>,
    partial: Vec<usize>,
    incumbent: Option<(Vec<usize>, f64)>,
    remaining_bound: Vec<f64>,
}

impl Search<'_> {
    fn descend(&mut self, patient: usize, accumulated: f64) {
        if Instant::now() >= self.deadline_at {
            self.timed_out = true;
            return;
        }

        if patient == self.problem.num_patients() {
            let better = self
                .incumbent
                .as_ref()
                .is_none_or(|(_, best)| accumulated < *best);
            if better {
                self.incumbent = Some((self.partial.clone(), accumulated));
            }
            return;
        }

        // Prune: even the optimistic completion cannot beat the incumbent.
        // `>=` keeps the first-found solution among cost ties.
        if let Some((_, best)) = &self.incumbent
            && accumulated + self.remaining_bound[patient] >= *best
        {
            return;
        }

        for index in 0..self.problem.preference[patient].len() {
            let facility = self.problem.preference[patient][index];
            if self.problem.is_excluded(patient, facility) {
                continue;
            }
            if !self.fits(patient, facility) {
                continue;
            }

            self.occupy(patient, facility, true);
            self.partial.push(facility);
            self.descend(patient + 1, accumulated + self.problem.costs[patient][facility]);
            self.partial.pop();
            self.occupy(patient, facility, false);

            if self.timed_out {
                return;
            }
        }
    }

    /// Whether the patient's demand fits into the facility's remaining
    /// capacity given current usage.
    fn fits(&self, patient: usize, facility: usize) -> bool {
        self.problem.demands[patient]
            .iter()
            .filter(|(_, quantity)| **quantity > 0)
            .all(|(resource, quantity)| {
                let used = self.usage[facility].get(resource).copied().unwrap_or(0);
                let capacity = self.problem.capacities[facility]
                    .get(resource)
                    .copied()
                    .unwrap_or(0);
                used + quantity <= capacity
            })
    }

    fn occupy(&mut self, patient: usize, facility: usize, apply: bool) {
        for (resource, quantity) in &self.problem.demands[patient] {
            if *quantity == 0 {
                continue;
            }
            let entry = self.usage[facility].entry(*resource).or_insert(0);
            if apply {
                *entry += quantity;
            } else {
                *entry -= quantity;
            }
        }
    }
}
