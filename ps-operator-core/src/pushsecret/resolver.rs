// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use k8s_openapi::{api::core::v1::Secret, ByteString};
use std::collections::BTreeMap;

use ps_operator_common::telemetry::debug;
use ps_operator_common::utils::compute_object_hash;

use crate::crd::v1alpha1::pushsecret::{PushSecretSpec, PushSecretStoreRef};
use crate::error::{PushSecretError, Result};
use crate::pushsecret::validation::validate_spec;

/// Key/value contents of a Secret
pub type SecretData = BTreeMap<String, ByteString>;


/// Remote keys and values to write, per referenced store
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPush {
    stores: BTreeMap<PushSecretStoreRef, SecretData>,
}

impl ResolvedPush {
    pub fn stores(&self) -> impl Iterator<Item = (&PushSecretStoreRef, &SecretData)> {
        self.stores.iter()
    }

    pub fn for_store(&self, store_ref: &PushSecretStoreRef) -> Option<&SecretData> {
        self.stores.get(store_ref)
    }

    /// Whether nothing would be written to any store
    pub fn is_empty(&self) -> bool {
        self.stores.values().all(BTreeMap::is_empty)
    }

    /// Stable hash over every store and remote key/value pair
    pub fn fingerprint(&self) -> Result<String> {
        let keyed: BTreeMap<String, &SecretData> = self.stores
            .iter()
            .map(|(store_ref, data)| (store_ref.to_string(), data))
            .collect();

        Ok(compute_object_hash(&keyed)?)
    }
}

/// Flatten a Secret's `data` and `stringData` into one map, with
/// `stringData` taking precedence like the API server does on write
pub fn secret_data(secret: &Secret) -> SecretData {
    let mut data = secret.data.clone().unwrap_or_default();

    if let Some(string_data) = &secret.string_data {
        data.extend(
            string_data
                .iter()
                .map(|(key, value)| (key.clone(), ByteString(value.clone().into_bytes())))
        );
    }

    data
}

/// Resolve which values are pushed under which remote keys
///
/// Every match writes its secret value under each of its remote keys, and
/// the same set is pushed to every referenced store. A secret key that is
/// missing from `data` aborts the whole resolution, as does a remote key
/// claimed by two different secret keys.
///
/// # Arguments
/// * `spec` - The PushSecret spec
/// * `data` - Contents of the Secret named by the spec's selector
///
/// # Returns
/// The resolved push, or the first resolution error
pub fn resolve_matches(spec: &PushSecretSpec, data: &SecretData) -> Result<ResolvedPush> {
    validate_spec(spec)?;

    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
    let mut resolved = SecretData::new();

    for push_data in &spec.data {
        for rule in &push_data.matches {
            let value = data.get(&rule.secret_key).ok_or_else(|| PushSecretError::MatchResolutionError {
                secret: spec.selector.secret.name.clone(),
                secret_key: rule.secret_key.clone(),
            })?;

            for remote_ref in &rule.remote_refs {
                let remote_key = remote_ref.remote_key.as_str();

                if let Some(owner) = owners.get(remote_key).filter(|owner| **owner != rule.secret_key) {
                    return Err(PushSecretError::ConflictingRemoteKey {
                        remote_key: remote_key.to_string(),
                        first: owner.to_string(),
                        second: rule.secret_key.clone(),
                    });
                }

                owners.insert(remote_key, &rule.secret_key);
                resolved.insert(remote_key.to_string(), value.clone());
            }
        }
    }

    debug!(
        event = "MatchesResolved",
        secret = spec.selector.secret.name.as_str(),
        stores = spec.secret_store_refs.len(),
        remote_keys = resolved.len(),
    );

    Ok(ResolvedPush {
        stores: spec.secret_store_refs
            .iter()
            .map(|store_ref| (store_ref.clone(), resolved.clone()))
            .collect(),
    })
}
