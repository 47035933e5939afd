// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use std::fmt::{Display, Formatter, Result as FmtResult};


/// Scope of a secret store
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
pub enum StoreKind {
    /// A namespaced store, only usable from its own namespace
    #[default]
    SecretStore,
    /// A cluster scoped store, usable from any namespace
    ClusterSecretStore,
}

impl StoreKind {
    pub fn is_cluster_scoped(&self) -> bool {
        matches!(self, StoreKind::ClusterSecretStore)
    }
}

impl Display for StoreKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StoreKind::SecretStore => write!(f, "SecretStore"),
            StoreKind::ClusterSecretStore => write!(f, "ClusterSecretStore"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    /// The name of the Secret to reference
    #[serde(default)]
    pub name: String,
    /// The key in the Secret to reference
    #[serde(default)]
    pub key: String,
    /// Namespace of the Secret, only honored for cluster scoped stores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountSelector {
    /// The name of the ServiceAccount to reference
    pub name: String,
    /// Namespace of the ServiceAccount. When omitted the namespace of the
    /// resource being reconciled is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Audiences requested for the projected token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audiences: Option<Vec<String>>,
}
