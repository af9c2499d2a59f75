//! Optimization rules: weights, penalties, speeds, and timeline budgets.
//!
//! Every tunable of the decision engine lives in [`Rules`]. The defaults
//! are the doctrine values the engine ships with; a deployment can retune
//! them from a YAML file without touching solver code. All penalties share
//! one abstract cost axis -- the solver objective is a plain weighted sum,
//! never multi-objective.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use medevac_types::{Acuity, Capability, TransportMode};
use serde::Deserialize;

/// Weight applied when a patient's acuity has no entry in the weight table.
const FALLBACK_ACUITY_WEIGHT: f64 = 50.0;

/// Errors that can occur when loading rules.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// Failed to read the rules file from disk.
    #[error("failed to read rules file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse rules YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for RulesError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Tunable rules for the transfer decision engine.
///
/// Any subset of fields may appear in a YAML override; missing fields keep
/// their doctrine defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rules {
    /// Acuity priority weights. Multiply ETA minutes to form the time cost,
    /// so higher-acuity patients are more sensitive to distance.
    #[serde(default = "default_acuity_weights")]
    pub acuity_weights: BTreeMap<Acuity, f64>,

    /// Stewardship penalties per scarce capability, applied when a facility
    /// possesses a capability the patient does not need. Capabilities not
    /// listed here carry no penalty.
    #[serde(default = "default_scarcity_penalties")]
    pub scarcity_penalties: BTreeMap<Capability, f64>,

    /// Penalty per required capability the facility lacks. Near-prohibitive
    /// but soft: an assignment remains representable.
    #[serde(default = "default_capability_mismatch_penalty")]
    pub capability_mismatch_penalty: f64,

    /// Penalty added once when any required resource is short.
    #[serde(default = "default_resource_deficit_penalty")]
    pub resource_deficit_penalty: f64,

    /// Base multiplier for the resource stress term.
    #[serde(default = "default_resource_stress_multiplier")]
    pub resource_stress_multiplier: f64,

    /// Exponent on utilization in the stress term (quadratic by default).
    #[serde(default = "default_resource_stress_exponent")]
    pub resource_stress_exponent: f64,

    /// Ground ambulance speed in km/h.
    #[serde(default = "default_ground_speed_kmh")]
    pub ground_speed_kmh: f64,

    /// Helicopter speed in km/h.
    #[serde(default = "default_air_speed_kmh")]
    pub air_speed_kmh: f64,

    /// Cumulative minutes to reach Role 1 care (Golden Hour).
    #[serde(default = "default_role1_budget_minutes")]
    pub role1_budget_minutes: f64,

    /// Cumulative minutes to reach Role 2 care (Damage Control).
    #[serde(default = "default_role2_budget_minutes")]
    pub role2_budget_minutes: f64,

    /// Maximum alternatives enumerated after the primary assignment.
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,

    /// Default wall-clock deadline for one solver invocation, in ms.
    #[serde(default = "default_solver_deadline_ms")]
    pub solver_deadline_ms: u64,
}

fn default_acuity_weights() -> BTreeMap<Acuity, f64> {
    BTreeMap::from([
        (Acuity::Dead, 0.0),
        (Acuity::Expectant, 80.0),
        (Acuity::Immediate, 100.0),
        (Acuity::Delayed, 50.0),
        (Acuity::Minimal, 10.0),
    ])
}

fn default_scarcity_penalties() -> BTreeMap<Capability, f64> {
    BTreeMap::from([
        (Capability::Burn, 500.0),
        (Capability::Pediatric, 500.0),
        (Capability::Neurosurgical, 400.0),
        (Capability::Cardiac, 300.0),
        (Capability::Obstetric, 200.0),
        (Capability::Ophthalmology, 150.0),
    ])
}

fn default_capability_mismatch_penalty() -> f64 {
    10_000.0
}

fn default_resource_deficit_penalty() -> f64 {
    5_000.0
}

fn default_resource_stress_multiplier() -> f64 {
    100.0
}

fn default_resource_stress_exponent() -> f64 {
    2.0
}

fn default_ground_speed_kmh() -> f64 {
    50.0
}

fn default_air_speed_kmh() -> f64 {
    200.0
}

fn default_role1_budget_minutes() -> f64 {
    60.0
}

fn default_role2_budget_minutes() -> f64 {
    120.0
}

fn default_max_alternatives() -> usize {
    3
}

fn default_solver_deadline_ms() -> u64 {
    5_000
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            acuity_weights: default_acuity_weights(),
            scarcity_penalties: default_scarcity_penalties(),
            capability_mismatch_penalty: default_capability_mismatch_penalty(),
            resource_deficit_penalty: default_resource_deficit_penalty(),
            resource_stress_multiplier: default_resource_stress_multiplier(),
            resource_stress_exponent: default_resource_stress_exponent(),
            ground_speed_kmh: default_ground_speed_kmh(),
            air_speed_kmh: default_air_speed_kmh(),
            role1_budget_minutes: default_role1_budget_minutes(),
            role2_budget_minutes: default_role2_budget_minutes(),
            max_alternatives: default_max_alternatives(),
            solver_deadline_ms: default_solver_deadline_ms(),
        }
    }
}

impl Rules {
    /// Load rules from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Io`] if the file cannot be read, or
    /// [`RulesError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, RulesError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse rules from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, RulesError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Priority weight for the given acuity (50 when the table has no
    /// entry for it).
    pub fn acuity_weight(&self, acuity: Acuity) -> f64 {
        self.acuity_weights
            .get(&acuity)
            .copied()
            .unwrap_or(FALLBACK_ACUITY_WEIGHT)
    }

    /// Stewardship penalty for the given capability (0 when unlisted).
    pub fn scarcity_penalty(&self, capability: Capability) -> f64 {
        self.scarcity_penalties
            .get(&capability)
            .copied()
            .unwrap_or(0.0)
    }

    /// Stress contribution for one required resource.
    ///
    /// Utilization is `required / max(capacity, 1)`, clipped to `[0, 1]`;
    /// the contribution is `multiplier * utilization ^ exponent`. Shortage
    /// itself is covered by [`Rules::resource_deficit_penalty`], not here.
    pub fn resource_stress(&self, required: u32, capacity: u32) -> f64 {
        let utilization = (f64::from(required) / f64::from(capacity.max(1))).min(1.0);
        self.resource_stress_multiplier * utilization.powf(self.resource_stress_exponent)
    }

    /// Travel speed in km/h for the given transport mode.
    pub fn speed_kmh(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Ground => self.ground_speed_kmh,
            TransportMode::Air => self.air_speed_kmh,
        }
    }

    /// The solver deadline as a [`Duration`].
    pub const fn solver_deadline(&self) -> Duration {
        Duration::from_millis(self.solver_deadline_ms)
    }
}
