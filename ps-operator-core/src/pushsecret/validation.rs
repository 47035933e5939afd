// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use crate::crd::v1alpha1::pushsecret::PushSecretSpec;
use crate::error::{PushSecretError, Result};


/// Strict structural validation of a PushSecret spec
///
/// Rejects specs that would push nothing to nowhere by mistake:
/// no store references, a blank store name or source secret name, a `data`
/// entry without matches, or a match without remote keys. A spec without
/// any `data` is accepted and resolves to an empty push.
pub fn validate_spec(spec: &PushSecretSpec) -> Result<()> {
    if spec.secret_store_refs.is_empty() {
        return Err(PushSecretError::InvalidSpec("secretStoreRefs must not be empty".to_string()));
    }

    if let Some(index) = spec.secret_store_refs.iter().position(|store_ref| store_ref.name.is_empty()) {
        return Err(PushSecretError::InvalidSpec(format!("secretStoreRefs[{}].name must not be empty", index)));
    }

    if spec.selector.secret.name.is_empty() {
        return Err(PushSecretError::InvalidSpec("selector.secret.name must not be empty".to_string()));
    }

    for (data_index, data) in spec.data.iter().enumerate() {
        if data.matches.is_empty() {
            return Err(PushSecretError::InvalidSpec(format!("data[{}].match must not be empty", data_index)));
        }

        for (match_index, rule) in data.matches.iter().enumerate() {
            if rule.secret_key.is_empty() {
                return Err(PushSecretError::InvalidSpec(
                    format!("data[{}].match[{}].secretKey must not be empty", data_index, match_index)
                ));
            }
            if rule.remote_refs.is_empty() {
                return Err(PushSecretError::InvalidSpec(
                    format!("data[{}].match[{}].remoteRefs must not be empty (secretKey `{}`)", data_index, match_index, rule.secret_key)
                ));
            }
            if rule.remote_refs.iter().any(|remote| remote.remote_key.is_empty()) {
                return Err(PushSecretError::InvalidSpec(
                    format!("data[{}].match[{}].remoteRefs contains an empty remoteKey", data_index, match_index)
                ));
            }
        }
    }

    Ok(())
}
