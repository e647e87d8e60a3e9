// ABOUTME: HTTP server assembly and lifecycle for the FitPlan API
// ABOUTME: Merges domain routers, applies tracing, CORS, request ID, and deadline layers, and serves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::{request_id_middleware, setup_cors, timeout_middleware};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, OptionsRoutes, PlanRoutes, ProfileRoutes};

/// Headroom on top of the LLM timeout before the server gives up on a request
const REQUEST_TIMEOUT_HEADROOM: Duration = Duration::from_secs(15);

/// Build the complete application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let request_timeout = resources.config.llm.request_timeout() + REQUEST_TIMEOUT_HEADROOM;
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(ProfileRoutes::routes(Arc::clone(&resources)))
        .merge(OptionsRoutes::routes(Arc::clone(&resources)))
        .merge(PlanRoutes::routes(resources))
        .layer(middleware::from_fn_with_state(
            request_timeout,
            timeout_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

/// HTTP server for the FitPlan API
pub struct FitPlanServer {
    resources: Arc<ServerResources>,
}

impl FitPlanServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn run(self) -> Result<()> {
        let address = format!(
            "{}:{}",
            self.resources.config.host, self.resources.config.http_port
        );
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind HTTP listener on {address}"))?;

        info!("HTTP server listening on http://{address}");
        display_available_endpoints(&address);

        axum::serve(listener, build_router(self.resources))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("HTTP server stopped");
        Ok(())
    }
}

#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(address: &str) {
    info!("=== Available API Endpoints ===");
    info!("   Health:            GET  http://{address}/health");
    info!("   Readiness:         GET  http://{address}/ready");
    info!("   Create Profile:    POST http://{address}/api/profile");
    info!("   Profile:           GET|PUT http://{address}/api/profiles/{{id}}");
    info!("   Options:           POST http://{address}/api/options");
    info!("   Options Catalog:   GET  http://{address}/api/fitness-options");
    info!("   Workout Plan:      POST|GET http://{address}/api/profiles/{{id}}/workout-plan");
    info!("=== End of Endpoint List ===");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
