// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

pub mod kubernetes;
pub mod selector;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::Result;


/// Outcome of validating a store against its backend.
///
/// `Unknown` means the check could not run yet, which is distinct from a
/// check that ran and failed.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Ready,
    Unknown,
    Error,
}

impl ValidationResult {
    /// Collapse a validation outcome into the coarse signal persisted on status
    pub fn from_outcome(outcome: &Result<ValidationResult>) -> Self {
        match outcome {
            Ok(result) => *result,
            Err(_) => ValidationResult::Error,
        }
    }
}

impl Display for ValidationResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ValidationResult::Ready => write!(f, "Ready"),
            ValidationResult::Unknown => write!(f, "Unknown"),
            ValidationResult::Error => write!(f, "Error"),
        }
    }
}
