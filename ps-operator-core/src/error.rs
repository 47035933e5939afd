// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use std::result;
use thiserror::Error;

/// Boxed error returned by pluggable backends such as the access reviewer
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum PushSecretError {
    #[error("missing CA trust material: a caBundle or caProvider is required")]
    MissingTrustMaterial,
    #[error("{0} cannot be empty")]
    InvalidAuthReference(&'static str),
    #[error("invalid auth configuration: {0}")]
    InvalidAuthMode(&'static str),
    #[error("secret selector validation failed: {0}")]
    SelectorValidationFailed(#[from] SelectorError),
    #[error("could not verify if client is valid: {0}")]
    AccessReviewTransportError(#[source] BoxError),
    #[error("client is not allowed to get secrets in namespace `{0}`")]
    AccessDenied(String),
    #[error("key `{secret_key}` not found in secret `{secret}`")]
    MatchResolutionError { secret: String, secret_key: String },
    #[error("remote key `{remote_key}` is claimed by both `{first}` and `{second}`")]
    ConflictingRemoteKey { remote_key: String, first: String, second: String },
    #[error("invalid spec: {0}")]
    InvalidSpec(String),
    #[error("failed to serialize: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("failed to render CRDs: {0}")]
    CrdGenerationError(String),
    #[error("failed to create client: {0}")]
    KubeError(#[from] kube::Error),
}

/// Errors raised by selector validators when a reference escapes the
/// scope of the store it belongs to
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("cluster scope requires namespace (reference `{0}`)")]
    NamespaceRequired(String),
    #[error("namespace `{found}` should either be empty or match the namespace `{expected}` of the SecretStore")]
    NamespaceMismatch { found: String, expected: String },
}

pub type Result<T> = result::Result<T, PushSecretError>;
