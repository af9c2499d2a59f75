//! Type-safe identifier wrappers for patients and facilities.
//!
//! Identifiers are caller-supplied opaque strings (the triage pipeline and
//! the facility registry mint them), so the wrappers carry a [`String`]
//! rather than a UUID. The newtypes exist to prevent accidental mixing of
//! patient and facility identifiers at compile time; their [`Ord`] impl is
//! plain lexicographic order, which the engine relies on for deterministic
//! tie-breaking.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a triaged patient.
    PatientId
}

define_id! {
    /// Unique identifier for a healthcare facility.
    FacilityId
}
