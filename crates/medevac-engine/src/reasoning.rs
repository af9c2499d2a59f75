//! Deterministic reasoning text for each decision outcome.
//!
//! One template per reasoning code, interpolated from decision parameters.
//! The strings are operator-facing summaries; the machine-readable truth is
//! always the reasoning code.

use medevac_types::CareRole;

/// Summary for an optimal single-destination assignment.
pub fn transfer_optimal(eta_minutes: f64) -> String {
    format!("Optimal facility selected using constraint optimization (ETA: {eta_minutes:.1} min)")
}

/// Summary for a completed NATO evacuation chain.
pub fn evacuation_chain(hop_count: usize, total_minutes: f64) -> String {
    format!(
        "NATO-compliant evacuation chain constructed ({hop_count} facilities, total time: {total_minutes:.1} min)"
    )
}

/// Summary when the patient is dead or the survival window has expired.
pub fn patient_deceased() -> String {
    String::from("Patient has deceased or survival window expired")
}

/// Summary when the best transfer exceeds the survival window.
pub fn dead_on_arrival(required_minutes: f64, window_minutes: f64) -> String {
    format!(
        "Patient will not survive transfer (requires {required_minutes:.1} min, survival window: {window_minutes:.1} min)"
    )
}

/// Summary when no facility can fill a role tier within its budget.
pub fn no_viable_chain(role: CareRole) -> String {
    format!(
        "Unable to construct viable evacuation chain within timeline (no reachable {role} facility)"
    )
}

/// Summary when the patient's location is unknown.
pub fn no_location() -> String {
    String::from("Patient location unknown")
}

/// Summary when no facility can take the patient, with a short detail
/// naming the cause (empty region, solver infeasibility, timeout, or a
/// structural input defect).
pub fn no_facilities(detail: &str) -> String {
    format!("No suitable facility available: {detail}")
}
