// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use thiserror::Error;
use std::result::Result;

use ps_operator_core::error::PushSecretError;

#[derive(Error, Debug)]
pub enum AdmissionError {
    #[error("missing object in admission request")]
    MissingObject,
    #[error("invalid kind: {0} expected {1}")]
    InvalidKind(String, String),
    #[error("invalid version: {0} for {1}")]
    InvalidVersion(String, String),
    #[error("malformed spec: {0}")]
    MalformedSpec(#[from] serde_json::Error),
    #[error("validation error: {0}")]
    ValidationError(#[from] PushSecretError),
}

pub type AdmissionResult<T> = Result<T, AdmissionError>;
