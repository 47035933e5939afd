// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use kube::CustomResourceExt;
use kube::core::crd::merge_crds;

use crate::crd::v1alpha1::pushsecret::PushSecret as V1Alpha1PushSecret;
use crate::error::{PushSecretError, Result};


/// Render the CRDs owned by the operator as a multi-document YAML stream
pub fn generate_crds() -> Result<String> {
    let crds = vec![
        merge_crds(vec![V1Alpha1PushSecret::crd()], "v1alpha1")
            .map_err(|e| PushSecretError::CrdGenerationError(e.to_string()))?,
    ];

    let mut output = String::new();
    for crd in crds {
        output.push_str("---\n");
        output.push_str(
            &serde_norway::to_string(&crd).map_err(|e| PushSecretError::CrdGenerationError(e.to_string()))?
        );
    }

    Ok(output)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_pushsecret_crd() {
        let yaml = generate_crds().unwrap();

        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("name: pushsecrets.external-secrets.io"));
        assert!(yaml.contains("kind: PushSecret"));
        assert!(yaml.contains("secretStoreRefs"));
    }
}
