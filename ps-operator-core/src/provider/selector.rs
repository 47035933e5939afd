// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use crate::crd::v1alpha1::{common::{SecretKeySelector, ServiceAccountSelector}, store::GenericStore};
use crate::error::SelectorError;


/// Decides whether a reference made by a store stays within the store's scope.
///
/// Injected into the store validator so it does not need to know how
/// selectors are eventually resolved.
pub trait SelectorValidator: Send + Sync {
    fn validate_secret_selector(&self, store: &GenericStore, selector: &SecretKeySelector) -> Result<(), SelectorError>;

    fn validate_service_account_selector(&self, store: &GenericStore, selector: &ServiceAccountSelector) -> Result<(), SelectorError>;
}

/// Namespace scoping rules shared by every store kind:
///
/// * a `ClusterSecretStore` has no namespace of its own, so secret
///   references must name one
/// * a `SecretStore` may only reference its own namespace
///
/// Service account references are referent: a missing namespace is filled
/// in later from the resource being reconciled, so only the second rule
/// applies to them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedSelectorValidator;

impl ScopedSelectorValidator {
    fn check_same_namespace(store: &GenericStore, namespace: Option<&String>) -> Result<(), SelectorError> {
        if store.kind.is_cluster_scoped() {
            return Ok(());
        }

        match namespace {
            Some(found) if Some(found) != store.namespace.as_ref() => Err(SelectorError::NamespaceMismatch {
                found: found.clone(),
                expected: store.namespace.clone().unwrap_or_default(),
            }),
            _ => Ok(()),
        }
    }
}

impl SelectorValidator for ScopedSelectorValidator {
    fn validate_secret_selector(&self, store: &GenericStore, selector: &SecretKeySelector) -> Result<(), SelectorError> {
        if store.kind.is_cluster_scoped() && selector.namespace.is_none() {
            return Err(SelectorError::NamespaceRequired(selector.name.clone()));
        }

        Self::check_same_namespace(store, selector.namespace.as_ref())
    }

    fn validate_service_account_selector(&self, store: &GenericStore, selector: &ServiceAccountSelector) -> Result<(), SelectorError> {
        Self::check_same_namespace(store, selector.namespace.as_ref())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::v1alpha1::{common::StoreKind, store::{KubernetesAuth, KubernetesProvider, KubernetesServer}};

    fn store(kind: StoreKind, namespace: Option<&str>) -> GenericStore {
        GenericStore {
            name: "remote".to_string(),
            kind,
            namespace: namespace.map(str::to_string),
            provider: KubernetesProvider {
                server: KubernetesServer::default(),
                auth: KubernetesAuth::default(),
                remote_namespace: "default".to_string(),
            },
        }
    }

    fn secret_ref(namespace: Option<&str>) -> SecretKeySelector {
        SecretKeySelector {
            name: "client-cert".to_string(),
            key: "tls.crt".to_string(),
            namespace: namespace.map(str::to_string),
        }
    }

    #[test]
    fn cluster_store_requires_secret_namespace() {
        let cluster = store(StoreKind::ClusterSecretStore, None);

        assert_eq!(
            ScopedSelectorValidator.validate_secret_selector(&cluster, &secret_ref(None)),
            Err(SelectorError::NamespaceRequired("client-cert".to_string()))
        );
        assert!(ScopedSelectorValidator.validate_secret_selector(&cluster, &secret_ref(Some("any"))).is_ok());
    }

    #[test]
    fn namespaced_store_rejects_foreign_namespace() {
        let namespaced = store(StoreKind::SecretStore, Some("team-a"));

        assert!(ScopedSelectorValidator.validate_secret_selector(&namespaced, &secret_ref(None)).is_ok());
        assert!(ScopedSelectorValidator.validate_secret_selector(&namespaced, &secret_ref(Some("team-a"))).is_ok());
        assert_eq!(
            ScopedSelectorValidator.validate_secret_selector(&namespaced, &secret_ref(Some("team-b"))),
            Err(SelectorError::NamespaceMismatch { found: "team-b".to_string(), expected: "team-a".to_string() })
        );
    }

    #[test]
    fn service_account_may_omit_namespace_on_cluster_store() {
        let cluster = store(StoreKind::ClusterSecretStore, None);
        let namespaced = store(StoreKind::SecretStore, Some("team-a"));
        let referent = ServiceAccountSelector { name: "pusher".to_string(), ..Default::default() };
        let foreign = ServiceAccountSelector { namespace: Some("team-b".to_string()), ..referent.clone() };

        assert!(ScopedSelectorValidator.validate_service_account_selector(&cluster, &referent).is_ok());
        assert!(ScopedSelectorValidator.validate_service_account_selector(&cluster, &foreign).is_ok());
        assert!(ScopedSelectorValidator.validate_service_account_selector(&namespaced, &referent).is_ok());
        assert!(ScopedSelectorValidator.validate_service_account_selector(&namespaced, &foreign).is_err());
    }
}
