// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use k8s_openapi::ByteString;
use serde::{Deserialize, Serialize};
use schemars::JsonSchema;

use crate::crd::v1alpha1::common::{SecretKeySelector, ServiceAccountSelector, StoreKind};


/// A resolved SecretStore or ClusterSecretStore backed by a Kubernetes cluster.
///
/// Stores are owned by another controller; this crate only reads them.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenericStore {
    pub name: String,
    #[serde(default)]
    pub kind: StoreKind,
    /// Namespace of the store, absent for cluster scoped stores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub provider: KubernetesProvider,
}

impl GenericStore {
    /// Namespace the access review should run against.
    ///
    /// A cluster scoped store using referent authorization only learns its
    /// namespace from the resource being reconciled, so without a caller
    /// namespace there is nothing to review yet.
    pub fn review_namespace(&self, caller_namespace: Option<&str>) -> Option<String> {
        let caller_namespace = caller_namespace.filter(|ns| !ns.is_empty());

        if self.kind.is_cluster_scoped() && caller_namespace.is_none() && self.provider.auth.is_referent() {
            return None;
        }

        Some(self.provider.remote_namespace.clone())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesProvider {
    /// How to reach the API server
    pub server: KubernetesServer,
    /// How to authenticate against the API server
    pub auth: KubernetesAuth,
    /// Namespace on the remote cluster secrets are read from
    #[serde(default = "default_remote_namespace")]
    pub remote_namespace: String,
}

fn default_remote_namespace() -> String {
    "default".to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesServer {
    #[serde(default = "default_server_url")]
    pub url: String,
    /// PEM encoded CA bundle used to verify the server certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub ca_bundle: Option<ByteString>,
    /// Where to load the CA bundle from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_provider: Option<CAProvider>,
}

fn default_server_url() -> String {
    "kubernetes.default".to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub enum CAProviderType {
    Secret,
    ConfigMap,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CAProvider {
    #[serde(rename = "type")]
    pub type_: CAProviderType,
    pub name: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesAuth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<CertAuth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenAuth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<ServiceAccountSelector>,
}

impl KubernetesAuth {
    /// Number of authentication modes configured
    pub fn configured_modes(&self) -> usize {
        [self.cert.is_some(), self.token.is_some(), self.service_account.is_some()]
            .into_iter()
            .filter(|configured| *configured)
            .count()
    }

    /// Whether any reference leaves its namespace to be filled in at call time
    ///
    /// Only the service account branch is reachable once a cluster store has
    /// passed validation, since its secret references must name a namespace.
    pub fn is_referent(&self) -> bool {
        self.cert.as_ref().is_some_and(|cert| cert.client_cert.namespace.is_none() || cert.client_key.namespace.is_none())
            || self.token.as_ref().is_some_and(|token| token.bearer_token.namespace.is_none())
            || self.service_account.as_ref().is_some_and(|sa| sa.namespace.is_none())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertAuth {
    #[serde(default)]
    pub client_cert: SecretKeySelector,
    #[serde(default)]
    pub client_key: SecretKeySelector,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenAuth {
    #[serde(default)]
    pub bearer_token: SecretKeySelector,
}
