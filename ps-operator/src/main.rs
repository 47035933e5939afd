// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

mod cli;

use std::{fs, path::Path, process, time::Duration};
use anyhow::{anyhow, ensure, Context as _};
use chrono::Utc;
use clap::{CommandFactory, Parser};
use k8s_openapi::api::core::v1::Secret;
use rustls::crypto::aws_lc_rs;
use serde::de::DeserializeOwned;
use serde_json::json;

use ps_operator_common::config::{AppConfig, AppConfigBuilder, LogFormat};
use ps_operator_common::telemetry::{error, info, setup_logging};
use ps_operator_core::crd::{utils as crd_utils, v1alpha1::{pushsecret::{PushSecret, PushSecretStatusCondition}, store::GenericStore}};
use ps_operator_core::error::PushSecretError;
use ps_operator_core::provider::{ValidationResult, kubernetes::{create_k8s_client, review::{KubeAccessReviewer, PermissionReviewer}, validate::StoreValidator}};
use ps_operator_core::pushsecret::resolver::{resolve_matches, secret_data};
use ps_operator_webhook::server::{create_router, create_tls_config, serve};

use crate::cli::{CliArgs, Commands};

#[tokio::main]
async fn main() {
    // Install the default aws_lc_rs crypto provider
    let _ = aws_lc_rs::default_provider().install_default();

    let args = CliArgs::parse();

    // Load configuration
    let config = load_config(&args).unwrap_or_else(|e| {
        setup_logging(LogFormat::default());
        error!(
            event = "Error",
            error = %e,
        );
        process::exit(1);
    });

    setup_logging(config.log.format);

    let result = match args.cmd {
        Some(Commands::Crds) => crd_utils::generate_crds()
            .map(|crds| print!("{}", crds))
            .map_err(anyhow::Error::from),
        Some(Commands::ValidateStore { file, namespace, offline }) => {
            validate_store(&config, &file, namespace.as_deref(), offline).await
        },
        Some(Commands::Resolve { push_secret, secret }) => resolve(&push_secret, &secret),
        Some(Commands::Webhook) => run_webhook(config).await,
        None => {
            let mut cmd = CliArgs::command();
            let _ = cmd.print_help();
            process::exit(1);
        },
    };

    if let Err(e) = result {
        error!(
            event = "Error",
            error = %format!("{:#}", e),
        );
        process::exit(1);
    }
}

fn load_config(args: &CliArgs) -> anyhow::Result<AppConfig> {
    let mut builder = AppConfigBuilder::default();

    if let Some(path) = args.config.as_deref() {
        builder.with_file(path);
    }

    builder
        .with_env()
        .with_override_option("log.format", args.log_format.as_deref())
        .build()
        .context("failed to load configuration")
}

/// Read a YAML (or JSON, which is valid YAML) manifest from disk
fn load_manifest<T: DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let contents = fs::read_to_string(Path::new(path))
        .with_context(|| format!("failed to read `{}`", path))?;

    serde_norway::from_str(&contents).with_context(|| format!("failed to parse `{}`", path))
}

async fn validate_store(config: &AppConfig, file: &str, namespace: Option<&str>, offline: bool) -> anyhow::Result<()> {
    let store: GenericStore = load_manifest(file)?;

    StoreValidator::new().validate_store(&store)?;
    info!(event = "StoreValid", store = store.name.as_str(), kind = %store.kind);

    if offline {
        return Ok(());
    }

    let client = create_k8s_client().await?;
    let reviewer = PermissionReviewer::new(KubeAccessReviewer::new(client));
    let review_namespace = store.review_namespace(namespace);

    // The reviewer has no deadline of its own; expiry counts as a failed review
    let outcome = tokio::time::timeout(
        Duration::from_secs(config.review.timeout_secs),
        reviewer.validate(review_namespace.as_deref()),
    )
    .await
    .unwrap_or_else(|elapsed| Err(PushSecretError::AccessReviewTransportError(Box::new(elapsed))));

    let condition = PushSecretStatusCondition::readiness(&outcome, Utc::now());
    println!("{}", serde_norway::to_string(&condition)?);

    match ValidationResult::from_outcome(&outcome) {
        ValidationResult::Error => Err(anyhow!(
            "store `{}` is not usable: {}",
            store.name,
            condition.message.unwrap_or_default(),
        )),
        result => {
            info!(
                event = "StoreAccessChecked",
                store = store.name.as_str(),
                namespace = review_namespace.as_deref().unwrap_or_default(),
                result = %result,
            );
            Ok(())
        },
    }
}

fn resolve(push_secret: &str, secret: &str) -> anyhow::Result<()> {
    let push_secret: PushSecret = load_manifest(push_secret)?;
    let secret: Secret = load_manifest(secret)?;

    let source_name = secret.metadata.name.as_deref().unwrap_or_default();
    ensure!(
        source_name == push_secret.spec.selector.secret.name,
        "PushSecret selects secret `{}` but `{}` was given",
        push_secret.spec.selector.secret.name,
        source_name,
    );

    let resolved = resolve_matches(&push_secret.spec, &secret_data(&secret))?;

    // Values are never printed, only where they would go
    let stores: serde_json::Map<String, serde_json::Value> = resolved
        .stores()
        .map(|(store_ref, data)| (store_ref.to_string(), json!(data.keys().collect::<Vec<_>>())))
        .collect();

    println!("{}", serde_json::to_string_pretty(&json!({
        "fingerprint": resolved.fingerprint()?,
        "stores": stores,
    }))?);

    Ok(())
}

async fn run_webhook(config: AppConfig) -> anyhow::Result<()> {
    info!(
        event = "Starting",
        version = env!("CARGO_PKG_VERSION"),
    );

    let addr = format!("{}:{}", config.webhook.host, config.webhook.port);
    let tls_config = create_tls_config(&config.webhook.tls.cert_file, &config.webhook.tls.key_file)
        .await
        .context("failed to load webhook TLS material")?;
    let router = create_router();

    info!(event = "Listening", address = addr.as_str());
    serve(&addr, router, tls_config).await?;
    info!(event = "Stopped");

    Ok(())
}
