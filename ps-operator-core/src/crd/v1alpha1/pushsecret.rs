// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use kube::CustomResource;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::crd::v1alpha1::common::StoreKind;

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, PartialEq, JsonSchema)]
#[kube(
    kind = "PushSecret",
    group = "external-secrets.io",
    version = "v1alpha1",
    status = "PushSecretStatus",
    doc = "PushSecret pushes fields of a local Secret to one or more remote secret stores.",
    derive = "PartialEq",
    category = "pushsecrets",
    printcolumn = r#"{"name":"AGE", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#,
    printcolumn = r#"{"name":"Status", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].reason"}"#,
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct PushSecretSpec {
    /// Stores the selected fields are pushed to
    pub secret_store_refs: Vec<PushSecretStoreRef>,
    /// The local Secret to read from
    pub selector: PushSecretSelector,
    /// Which fields to push, and under which remote keys
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<PushSecretData>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushSecretStoreRef {
    /// Name of the SecretStore resource
    pub name: String,
    /// Kind of the SecretStore resource (SecretStore or ClusterSecretStore).
    /// Defaults to `SecretStore`
    #[serde(default)]
    pub kind: StoreKind,
}

impl Display for PushSecretStoreRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct PushSecretSelector {
    pub secret: PushSecretSecret,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct PushSecretSecret {
    /// Name of the Secret in the PushSecret's namespace
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct PushSecretData {
    #[serde(rename = "match")]
    pub matches: Vec<PushSecretMatch>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushSecretMatch {
    /// Key of the local Secret's data to push
    pub secret_key: String,
    /// Remote keys the value is written to
    pub remote_refs: Vec<PushSecretRemoteRef>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushSecretRemoteRef {
    /// Name of the destination key in the remote store
    pub remote_key: String,
}


#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub enum PushSecretConditionType {
    Ready,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl Display for ConditionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ConditionStatus::True => write!(f, "True"),
            ConditionStatus::False => write!(f, "False"),
            ConditionStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushSecretStatusCondition {
    #[serde(rename = "type")]
    pub type_: PushSecretConditionType,
    pub status: ConditionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushSecretStatus {
    /// Time the source Secret was last pushed to the stores
    #[serde(default)]
    pub refresh_time: Option<DateTime<Utc>>,
    /// Resource version of the source Secret at the last push
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub synced_resource_version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<PushSecretStatusCondition>,
}
