// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use axum::{
    response::IntoResponse,
    routing::post,
    Router,
    Json,
};
use kube::core::{admission::{AdmissionRequest, AdmissionResponse, AdmissionReview}, DynamicObject};

use ps_operator_common::telemetry::info;

use crate::admission::error::AdmissionError;
use crate::admission::pushsecret::validate_pushsecret_crd;

pub fn router() -> Router {
    Router::new().route("/external-secrets.io/pushsecret/validate", post(validate_pushsecret_crd_endpoint))
}

async fn validate_pushsecret_crd_endpoint(payload: Json<AdmissionReview<DynamicObject>>) -> impl IntoResponse {
    let request: AdmissionRequest<DynamicObject> = match payload.0.try_into() {
        Ok(request) => request,
        Err(err) => {
            return Json(AdmissionResponse::invalid(err.to_string()).into_review());
        }
    };
    // Defaults to allow
    let mut response = AdmissionResponse::from(&request);

    // Deletions carry no object to validate
    let outcome = match request.object.as_ref() {
        Some(object) => validate_pushsecret_crd(object),
        None if request.old_object.is_some() => Ok(()),
        None => Err(AdmissionError::MissingObject),
    };

    if let Err(err) = outcome {
        info!(
            event = "AdmissionDenied",
            name = request.name.as_str(),
            namespace = request.namespace.as_deref().unwrap_or_default(),
            reason = %err,
        );
        response = response.deny(err.to_string());
    }

    Json(response.into_review())
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn push_secret(spec: Value) -> Value {
        json!({
            "apiVersion": "external-secrets.io/v1alpha1",
            "kind": "PushSecret",
            "metadata": {"name": "db-push", "namespace": "team-a"},
            "spec": spec,
        })
    }

    fn valid_spec() -> Value {
        json!({
            "secretStoreRefs": [{"name": "vault"}],
            "selector": {"secret": {"name": "db-credentials"}},
            "data": [{"match": [{"secretKey": "password", "remoteRefs": [{"remoteKey": "db/password"}]}]}]
        })
    }

    fn review(operation: &str, object: Option<Value>, old_object: Option<Value>) -> Value {
        json!({
            "apiVersion": "admission.k8s.io/v1",
            "kind": "AdmissionReview",
            "request": {
                "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
                "kind": {"group": "external-secrets.io", "version": "v1alpha1", "kind": "PushSecret"},
                "resource": {"group": "external-secrets.io", "version": "v1alpha1", "resource": "pushsecrets"},
                "name": "db-push",
                "namespace": "team-a",
                "operation": operation,
                "userInfo": {"username": "admin"},
                "object": object,
                "oldObject": old_object,
                "dryRun": false,
            }
        })
    }

    /// Post a review to the validate endpoint and return the `response` section
    async fn submit(review: Value) -> Value {
        let request = Request::builder()
            .method("POST")
            .uri("/external-secrets.io/pushsecret/validate")
            .header("content-type", "application/json")
            .body(Body::from(review.to_string()))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let review: Value = serde_json::from_slice(&body).unwrap();
        review["response"].clone()
    }

    #[tokio::test]
    async fn create_with_valid_spec_is_allowed() {
        let response = submit(review("CREATE", Some(push_secret(valid_spec())), None)).await;

        assert_eq!(response["allowed"], json!(true));
        assert_eq!(response["uid"], json!("705ab4f5-6393-11e8-b7cc-42010a800002"));
    }

    #[tokio::test]
    async fn delete_with_only_old_object_is_allowed() {
        let response = submit(review("DELETE", None, Some(push_secret(valid_spec())))).await;

        assert_eq!(response["allowed"], json!(true));
    }

    #[tokio::test]
    async fn request_without_any_object_is_denied() {
        let response = submit(review("CREATE", None, None)).await;

        assert_eq!(response["allowed"], json!(false));
        assert_eq!(response["status"]["message"], json!("missing object in admission request"));
    }

    #[tokio::test]
    async fn invalid_spec_is_denied_with_reason() {
        let mut spec = valid_spec();
        spec["secretStoreRefs"] = json!([]);

        let response = submit(review("CREATE", Some(push_secret(spec)), None)).await;

        assert_eq!(response["allowed"], json!(false));
        assert!(response["status"]["message"]
            .as_str()
            .unwrap()
            .contains("secretStoreRefs must not be empty"));
    }
}
