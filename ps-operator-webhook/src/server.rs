// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use std::{io, time::Duration, net::SocketAddr};
use axum::{
    routing::get,
    Router,
};
use axum::response::{Json, IntoResponse};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use serde::Serialize;
use tokio::signal;

use ps_operator_common::constant::APP_NAME;
use ps_operator_common::telemetry::{create_trace_layer, info};

use crate::router::v1::admission;

#[derive(Serialize)]
struct RootResponse {
    name: &'static str,
    version: &'static str,
}

pub fn create_router() -> Router {
    Router::new()
        .nest("/admission", admission::router())
        .layer(create_trace_layer())
        // Root endpoint after the tracing layer to ensure
        // that the root endpoint is not traced
        .route("/", get(|| async {
            let response = RootResponse {
                name: APP_NAME,
                version: env!("CARGO_PKG_VERSION"),
            };
            Json(response).into_response()
        }))
}

pub async fn create_tls_config(cert_file: &str, key_file: &str) -> io::Result<RustlsConfig> {
    RustlsConfig::from_pem_file(cert_file, key_file).await
}

/// Serve the router over TLS until SIGINT or SIGTERM is received
pub async fn serve(addr: &str, router: Router, tls_config: RustlsConfig) -> io::Result<()> {
    let addr = addr
        .parse::<SocketAddr>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let handle = Handle::new();

    tokio::spawn(shutdown_signal(handle.clone()));

    axum_server::bind_rustls(addr, tls_config)
        .handle(handle)
        .serve(router.into_make_service())
        .await
}

pub async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            info!(event = "SignalHandlerError", error = %e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            },
            Err(e) => {
                info!(event = "SignalHandlerError", error = %e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => (),
        _ = terminate => (),
    }

    info!(event = "ShuttingDown");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
