// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use serde_json::Value;
use kube::core::DynamicObject;

use ps_operator_core::crd::v1alpha1::pushsecret::PushSecretSpec;
use ps_operator_core::pushsecret::validation::validate_spec;

use crate::admission::error::{AdmissionResult, AdmissionError};

pub static PUSHSECRET_KIND: &str = "PushSecret";


fn validate_pushsecret_v1alpha1(spec: Value) -> AdmissionResult<()> {
    let spec: PushSecretSpec = serde_json::from_value(spec)?;

    validate_spec(&spec)?;

    Ok(())
}

/// Validate a PushSecret submitted through an admission review
pub fn validate_pushsecret_crd(payload: &DynamicObject) -> AdmissionResult<()> {
    let payload_types = payload.types.clone().unwrap_or_default();

    if payload_types.kind != PUSHSECRET_KIND {
        return Err(AdmissionError::InvalidKind(payload_types.kind, PUSHSECRET_KIND.to_string()));
    }

    let version = payload_types
        .api_version
        .split('/')
        .next_back()
        .unwrap_or(&payload_types.api_version);
    let json_spec = payload.data.get("spec").cloned().unwrap_or(Value::Null);

    match version {
        "v1alpha1" => validate_pushsecret_v1alpha1(json_spec),
        _ => Err(AdmissionError::InvalidVersion(version.to_string(), PUSHSECRET_KIND.to_string())),
    }
}
