// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use async_trait::async_trait;
use k8s_openapi::api::authorization::v1::{ResourceAttributes, SelfSubjectAccessReview, SelfSubjectAccessReviewSpec};
use kube::{api::{Api, ObjectMeta, PostParams}, Client};

use ps_operator_common::telemetry::{debug, warn};

use crate::error::{BoxError, PushSecretError, Result};
use crate::provider::ValidationResult;

pub static SECRETS_RESOURCE: &str = "secrets";
pub static GET_VERB: &str = "get";


/// Answers whether the identity this process runs as may perform an action.
#[async_trait]
pub trait AccessReviewer: Send + Sync {
    async fn review(&self, attributes: ResourceAttributes) -> std::result::Result<bool, BoxError>;
}

/// Access reviewer backed by `SelfSubjectAccessReview` on the Kubernetes API
#[derive(Clone)]
pub struct KubeAccessReviewer {
    client: Client,
}

impl KubeAccessReviewer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccessReviewer for KubeAccessReviewer {
    async fn review(&self, attributes: ResourceAttributes) -> std::result::Result<bool, BoxError> {
        let api = Api::<SelfSubjectAccessReview>::all(self.client.clone());
        let request = SelfSubjectAccessReview {
            metadata: ObjectMeta::default(),
            spec: SelfSubjectAccessReviewSpec {
                resource_attributes: Some(attributes),
                ..Default::default()
            },
            status: None,
        };

        let response = api.create(&PostParams::default(), &request).await?;

        Ok(response.status.is_some_and(|status| status.allowed))
    }
}

/// Attributes of a `get` on `secrets` within `namespace`
pub fn secret_read_attributes(namespace: &str) -> ResourceAttributes {
    ResourceAttributes {
        resource: Some(SECRETS_RESOURCE.to_string()),
        namespace: Some(namespace.to_string()),
        verb: Some(GET_VERB.to_string()),
        ..Default::default()
    }
}

/// Checks that the runtime identity can read secrets in a namespace.
///
/// Each call costs one round trip to the reviewer. Nothing is cached or
/// retried, and there is no deadline beyond what the transport enforces.
pub struct PermissionReviewer<R> {
    reviewer: R,
}

impl<R> PermissionReviewer<R>
where
    R: AccessReviewer,
{
    pub fn new(reviewer: R) -> Self {
        Self { reviewer }
    }

    /// Validate read access to secrets
    ///
    /// # Arguments
    /// * `namespace` - The namespace to check, `None` (or empty) when it is not
    ///   known yet because the store uses referent authorization
    ///
    /// # Returns
    /// `Unknown` without contacting the backend when there is no namespace,
    /// `Ready` when access is allowed, and an error when the review fails or
    /// denies access
    pub async fn validate(&self, namespace: Option<&str>) -> Result<ValidationResult> {
        let Some(namespace) = namespace.filter(|ns| !ns.is_empty()) else {
            debug!(
                event = "AccessReviewSkipped",
                reason = "namespace not yet known",
            );
            return Ok(ValidationResult::Unknown);
        };

        let allowed = self.reviewer
            .review(secret_read_attributes(namespace))
            .await
            .map_err(PushSecretError::AccessReviewTransportError)?;

        if !allowed {
            warn!(
                event = "AccessDenied",
                namespace = namespace,
                resource = SECRETS_RESOURCE,
                verb = GET_VERB,
            );
            return Err(PushSecretError::AccessDenied(namespace.to_string()));
        }

        debug!(event = "AccessGranted", namespace = namespace);

        Ok(ValidationResult::Ready)
    }
}
