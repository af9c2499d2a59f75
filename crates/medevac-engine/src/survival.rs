//! Survival window derivation and patient viability classification.
//!
//! The survival window ("slack time") is the span between now and the
//! predicted death timestamp. A patient with no prediction has no hard
//! deadline -- the window is unbounded and every deadline comparison
//! passes.

use chrono::{DateTime, Utc};
use medevac_types::{Acuity, Patient, ReasoningCode};

/// Result of the viability classification that gates every decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viability {
    /// The decision may proceed with this survival window (minutes;
    /// `None` = unbounded).
    Proceed(Option<f64>),
    /// The decision forfeits immediately with the given code.
    Forfeit(ReasoningCode),
}

/// Minutes remaining before predicted death, clamped at zero.
///
/// Returns `None` when the patient has no predicted death timestamp.
pub fn survival_window_minutes(patient: &Patient, current_time: DateTime<Utc>) -> Option<f64> {
    patient.predicted_death_timestamp.map(|death| {
        let seconds = death
            .signed_duration_since(current_time)
            .num_milliseconds() as f64
            / 1_000.0;
        (seconds / 60.0).max(0.0)
    })
}

/// Classify patient viability, in contract order:
///
/// 1. Confirmed dead (flag or acuity) forfeits with `PATIENT_DECEASED`.
/// 2. An expired survival window forfeits with `PATIENT_DECEASED`.
/// 3. An absent location forfeits with `NO_LOCATION`.
/// 4. Otherwise the decision proceeds.
pub fn classify(patient: &Patient, current_time: DateTime<Utc>) -> Viability {
    if patient.deceased || patient.acuity == Acuity::Dead {
        return Viability::Forfeit(ReasoningCode::PatientDeceased);
    }

    let window = survival_window_minutes(patient, current_time);
    if let Some(minutes) = window
        && minutes <= 0.0
    {
        return Viability::Forfeit(ReasoningCode::PatientDeceased);
    }

    if patient.location.is_none() {
        return Viability::Forfeit(ReasoningCode::NoLocation);
    }

    Viability::Proceed(window)
}

/// Whether `minutes` fits inside an optional budget (`None` = unbounded).
pub fn within_window(minutes: f64, window: Option<f64>) -> bool {
    window.is_none_or(|limit| minutes <= limit)
}
