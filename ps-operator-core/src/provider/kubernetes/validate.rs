// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use ps_operator_common::telemetry::debug;

use crate::crd::v1alpha1::{common::SecretKeySelector, store::GenericStore};
use crate::error::{PushSecretError, Result};
use crate::provider::selector::{ScopedSelectorValidator, SelectorValidator};


/// Structural validation of a Kubernetes backed store.
///
/// Runs without any network access; the first violated constraint is
/// returned.
#[derive(Debug, Clone)]
pub struct StoreValidator<V = ScopedSelectorValidator> {
    selectors: V,
}

impl StoreValidator {
    /// A validator applying the default namespace scoping rules
    pub fn new() -> Self {
        StoreValidator { selectors: ScopedSelectorValidator }
    }
}

impl Default for StoreValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> StoreValidator<V>
where
    V: SelectorValidator,
{
    pub fn with_selectors(selectors: V) -> Self {
        StoreValidator { selectors }
    }

    /// Validate a store configuration
    ///
    /// # Arguments
    /// * `store` - The store to validate
    ///
    /// # Returns
    /// The first structural problem found, if any
    pub fn validate_store(&self, store: &GenericStore) -> Result<()> {
        let provider = &store.provider;

        if provider.server.ca_bundle.is_none() && provider.server.ca_provider.is_none() {
            return Err(PushSecretError::MissingTrustMaterial);
        }

        if let Some(cert) = &provider.auth.cert {
            self.validate_secret_ref(store, &cert.client_cert, "ClientCert.Name", "ClientCert.Key")?;
        }

        if let Some(token) = &provider.auth.token {
            self.validate_secret_ref(store, &token.bearer_token, "BearerToken.Name", "BearerToken.Key")?;
        }

        if let Some(service_account) = &provider.auth.service_account {
            self.selectors.validate_service_account_selector(store, service_account)?;
        }

        match provider.auth.configured_modes() {
            0 => return Err(PushSecretError::InvalidAuthMode("one of cert, token or serviceAccount is required")),
            1 => (),
            _ => return Err(PushSecretError::InvalidAuthMode("only one of cert, token or serviceAccount may be set")),
        }

        debug!(
            event = "StoreValidated",
            store = store.name.as_str(),
            kind = %store.kind,
        );

        Ok(())
    }

    fn validate_secret_ref(
        &self,
        store: &GenericStore,
        selector: &SecretKeySelector,
        name_field: &'static str,
        key_field: &'static str,
    ) -> Result<()> {
        if selector.name.is_empty() {
            return Err(PushSecretError::InvalidAuthReference(name_field));
        }
        if selector.key.is_empty() {
            return Err(PushSecretError::InvalidAuthReference(key_field));
        }

        self.selectors.validate_secret_selector(store, selector)?;

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use k8s_openapi::ByteString;

    use crate::crd::v1alpha1::common::{ServiceAccountSelector, StoreKind};
    use crate::crd::v1alpha1::store::{
        CAProvider, CAProviderType, CertAuth, KubernetesAuth, KubernetesProvider, KubernetesServer, TokenAuth,
    };
    use crate::error::SelectorError;

    /// Accepts everything and remembers which selectors it was asked about
    #[derive(Default)]
    struct RecordingSelectors {
        calls: Mutex<Vec<String>>,
        reject: bool,
    }

    impl SelectorValidator for RecordingSelectors {
        fn validate_secret_selector(&self, _store: &GenericStore, selector: &SecretKeySelector) -> std::result::Result<(), SelectorError> {
            self.calls.lock().unwrap().push(format!("secret:{}", selector.name));
            if self.reject {
                return Err(SelectorError::NamespaceRequired(selector.name.clone()));
            }
            Ok(())
        }

        fn validate_service_account_selector(&self, _store: &GenericStore, selector: &ServiceAccountSelector) -> std::result::Result<(), SelectorError> {
            self.calls.lock().unwrap().push(format!("sa:{}", selector.name));
            Ok(())
        }
    }

    fn secret_ref(name: &str, key: &str) -> SecretKeySelector {
        SecretKeySelector {
            name: name.to_string(),
            key: key.to_string(),
            namespace: None,
        }
    }

    fn store_with(auth: KubernetesAuth) -> GenericStore {
        GenericStore {
            name: "remote".to_string(),
            kind: StoreKind::SecretStore,
            namespace: Some("team-a".to_string()),
            provider: KubernetesProvider {
                server: KubernetesServer {
                    url: "https://remote.example:6443".to_string(),
                    ca_bundle: Some(ByteString(b"-----BEGIN CERTIFICATE-----".to_vec())),
                    ca_provider: None,
                },
                auth,
                remote_namespace: "default".to_string(),
            },
        }
    }

    fn cert_auth(name: &str, key: &str) -> KubernetesAuth {
        KubernetesAuth {
            cert: Some(CertAuth {
                client_cert: secret_ref(name, key),
                client_key: secret_ref("client-key", "tls.key"),
            }),
            ..Default::default()
        }
    }

    fn token_auth(name: &str, key: &str) -> KubernetesAuth {
        KubernetesAuth {
            token: Some(TokenAuth { bearer_token: secret_ref(name, key) }),
            ..Default::default()
        }
    }

    #[test]
    fn missing_trust_material_regardless_of_auth() {
        for auth in [cert_auth("", ""), token_auth("token", "token"), KubernetesAuth::default()] {
            let mut store = store_with(auth);
            store.provider.server.ca_bundle = None;

            let err = StoreValidator::new().validate_store(&store).unwrap_err();

            assert!(matches!(err, PushSecretError::MissingTrustMaterial));
        }
    }

    #[test]
    fn ca_provider_alone_is_enough_trust() {
        let mut store = store_with(token_auth("token", "token"));
        store.provider.server.ca_bundle = None;
        store.provider.server.ca_provider = Some(CAProvider {
            type_: CAProviderType::ConfigMap,
            name: "kube-root-ca.crt".to_string(),
            key: "ca.crt".to_string(),
            namespace: None,
        });

        assert!(StoreValidator::new().validate_store(&store).is_ok());
    }

    #[test]
    fn both_ca_sources_are_accepted() {
        let mut store = store_with(token_auth("token", "token"));
        store.provider.server.ca_provider = Some(CAProvider {
            type_: CAProviderType::Secret,
            name: "ca".to_string(),
            key: "ca.crt".to_string(),
            namespace: None,
        });

        assert!(StoreValidator::new().validate_store(&store).is_ok());
    }

    #[test]
    fn empty_client_cert_name() {
        let err = StoreValidator::new().validate_store(&store_with(cert_auth("", "tls.crt"))).unwrap_err();

        assert!(matches!(err, PushSecretError::InvalidAuthReference("ClientCert.Name")));
        assert!(err.to_string().contains("ClientCert.Name"));
    }

    #[test]
    fn empty_client_cert_key() {
        let err = StoreValidator::new().validate_store(&store_with(cert_auth("client-cert", ""))).unwrap_err();

        assert!(matches!(err, PushSecretError::InvalidAuthReference("ClientCert.Key")));
        assert!(err.to_string().contains("ClientCert.Key"));
    }

    #[test]
    fn empty_bearer_token_fields() {
        let validator = StoreValidator::new();

        let err = validator.validate_store(&store_with(token_auth("", "token"))).unwrap_err();
        assert_eq!(err.to_string(), "BearerToken.Name cannot be empty");

        let err = validator.validate_store(&store_with(token_auth("token", ""))).unwrap_err();
        assert_eq!(err.to_string(), "BearerToken.Key cannot be empty");
    }

    #[test]
    fn selector_failure_is_wrapped() {
        let validator = StoreValidator::with_selectors(RecordingSelectors { reject: true, ..Default::default() });

        let err = validator.validate_store(&store_with(cert_auth("client-cert", "tls.crt"))).unwrap_err();

        assert!(matches!(
            err,
            PushSecretError::SelectorValidationFailed(SelectorError::NamespaceRequired(ref name)) if name == "client-cert"
        ));
    }

    #[test]
    fn selector_capability_not_consulted_for_empty_reference() {
        let validator = StoreValidator::with_selectors(RecordingSelectors::default());

        assert!(validator.validate_store(&store_with(token_auth("", "token"))).is_err());
        assert!(validator.selectors.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn service_account_goes_through_referent_validator() {
        let validator = StoreValidator::with_selectors(RecordingSelectors::default());
        let store = store_with(KubernetesAuth {
            service_account: Some(ServiceAccountSelector { name: "pusher".to_string(), ..Default::default() }),
            ..Default::default()
        });

        assert!(validator.validate_store(&store).is_ok());
        assert_eq!(*validator.selectors.calls.lock().unwrap(), vec!["sa:pusher".to_string()]);
    }

    #[test]
    fn default_selector_rules_apply_to_namespaced_store() {
        let mut auth = token_auth("token", "token");
        if let Some(token) = auth.token.as_mut() {
            token.bearer_token.namespace = Some("team-b".to_string());
        }

        let err = StoreValidator::new().validate_store(&store_with(auth)).unwrap_err();

        assert!(matches!(err, PushSecretError::SelectorValidationFailed(SelectorError::NamespaceMismatch { .. })));
    }

    #[test]
    fn cluster_store_secret_refs_cannot_stay_referent() {
        let mut store = store_with(token_auth("token", "token"));
        store.kind = StoreKind::ClusterSecretStore;
        store.namespace = None;

        assert!(store.provider.auth.is_referent());

        let err = StoreValidator::new().validate_store(&store).unwrap_err();

        assert!(matches!(err, PushSecretError::SelectorValidationFailed(SelectorError::NamespaceRequired(_))));
    }

    #[test]
    fn exactly_one_auth_mode() {
        let validator = StoreValidator::new();

        let err = validator.validate_store(&store_with(KubernetesAuth::default())).unwrap_err();
        assert!(matches!(err, PushSecretError::InvalidAuthMode(_)));

        let mut both = cert_auth("client-cert", "tls.crt");
        both.token = token_auth("token", "token").token;
        let err = validator.validate_store(&store_with(both)).unwrap_err();
        assert!(matches!(err, PushSecretError::InvalidAuthMode(_)));
    }
}
