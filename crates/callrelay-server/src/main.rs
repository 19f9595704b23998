use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod models;
mod routes;
mod services;

use adapters::{HttpNotifier, TwilioClient, UltravoxClient};
use application::{
    ArtifactFetcher, CallOrchestrator, CallRegistry, CallSettings, NotificationDispatcher,
};
use callrelay::SessionRequest;
use config::AppConfig;
use services::registry_sweeper::{RegistrySweeper, SweeperConfig};

/// Orchestrator wired to the production adapters
pub type AppOrchestrator = CallOrchestrator<UltravoxClient, TwilioClient, HttpNotifier>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AppOrchestrator>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Callrelay API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Wire adapters and application services from configuration
fn build_state(config: &AppConfig) -> Result<AppState, callrelay::DomainError> {
    let provider = Arc::new(UltravoxClient::new(&config.ultravox, config.http_timeout)?);
    let carrier = Arc::new(TwilioClient::new(&config.twilio, config.http_timeout)?);
    let notifier = Arc::new(HttpNotifier::new(&config.webhook, config.http_timeout)?);

    let fetcher = ArtifactFetcher::new(provider.clone(), config.artifacts.clone());
    let dispatcher = Arc::new(NotificationDispatcher::new(
        fetcher,
        notifier,
        config.twilio.phone_number.clone(),
    ));

    let mut session = SessionRequest::default();
    if let Some(model) = &config.ultravox.model {
        session.model = model.clone();
    }
    if let Some(voice) = &config.ultravox.voice {
        session.voice = voice.clone();
    }

    let settings = CallSettings {
        origin: config.twilio.phone_number.clone(),
        status_callback_url: config.status_callback_url(),
        prompt_template: config.system_prompt.clone(),
        session,
    };

    // A zero TTL keeps entries for the life of the process
    let registry = if config.registry.ttl.is_zero() {
        CallRegistry::new()
    } else {
        CallRegistry::new().with_ttl(config.registry.ttl)
    };
    let orchestrator = CallOrchestrator::new(provider, carrier, registry, dispatcher, settings);

    Ok(AppState {
        orchestrator: Arc::new(orchestrator),
    })
}

fn build_router(state: AppState) -> Router {
    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::call::router())
        .merge(routes::status::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("📞 Callrelay API initializing...");

    let config = AppConfig::from_secrets(&secrets)
        .map_err(|e| shuttle_runtime::Error::Custom(anyhow::anyhow!(e)))?;

    if config.webhook.secret.is_none() {
        tracing::warn!("⚠️  No MAKE_WEBHOOK_SECRET set - webhook deliveries are unsigned");
    }

    let state =
        build_state(&config).map_err(|e| shuttle_runtime::Error::Custom(anyhow::anyhow!(e)))?;

    tracing::info!(
        callback = %config.status_callback_url(),
        "🔔 Status callbacks configured"
    );

    // Start registry sweeper
    let _sweeper = RegistrySweeper::new(
        state.orchestrator.registry().clone(),
        Some(SweeperConfig {
            interval: config.registry.sweep_interval,
            enabled: !config.registry.ttl.is_zero(),
        }),
    )
    .start();

    let router = build_router(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Callrelay API ready");

    Ok(router.into())
}
