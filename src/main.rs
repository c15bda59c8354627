//! nps-pulse server binary.
//!
//! Wires the Postgres adapters into the application handlers and
//! serves the survey and admin APIs.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nps_pulse::adapters::events::TracingEventPublisher;
use nps_pulse::adapters::http::{admin_routes, survey_routes, AdminHandlers, SurveyHandlers};
use nps_pulse::adapters::postgres::{
    PostgresAnswerRepository, PostgresCodeRepository, PostgresProjectReader,
    PostgresResponseReader,
};
use nps_pulse::application::handlers::answer::{GetAnswersHandler, RecordAnswerHandler};
use nps_pulse::application::handlers::code::GenerateCodeHandler;
use nps_pulse::application::handlers::flow::{
    ActivateCodeHandler, EnterSurveyHandler, SubmitSurveyHandler,
};
use nps_pulse::application::handlers::report::{CompareSegmentsHandler, GetOverviewHandler};
use nps_pulse::config::AppConfig;
use nps_pulse::ports::{
    AnswerRepository, CodeRepository, EventPublisher, ProjectReader, ResponseReader,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    info!(
        environment = ?config.server.environment,
        "starting nps-pulse"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // ports
    let codes: Arc<dyn CodeRepository> = Arc::new(PostgresCodeRepository::new(pool.clone()));
    let answers: Arc<dyn AnswerRepository> = Arc::new(PostgresAnswerRepository::new(pool.clone()));
    let responses: Arc<dyn ResponseReader> = Arc::new(PostgresResponseReader::new(pool.clone()));
    let projects: Arc<dyn ProjectReader> = Arc::new(PostgresProjectReader::new(pool.clone()));
    let events: Arc<dyn EventPublisher> = Arc::new(TracingEventPublisher::new());

    // application handlers
    let enter = Arc::new(EnterSurveyHandler::new(codes.clone()));
    let activate = Arc::new(ActivateCodeHandler::new(codes.clone(), events.clone()));
    let record = Arc::new(RecordAnswerHandler::new(codes.clone(), answers.clone()));
    let submit = Arc::new(SubmitSurveyHandler::new(
        codes.clone(),
        answers.clone(),
        events.clone(),
    ));
    let generate = Arc::new(GenerateCodeHandler::new(
        codes.clone(),
        events.clone(),
        &config.survey,
    ));
    let timeline = Arc::new(GetAnswersHandler::new(responses.clone(), projects.clone()));
    let overview = Arc::new(GetOverviewHandler::new(responses.clone()));
    let segments = Arc::new(CompareSegmentsHandler::new(responses.clone()));

    let survey = SurveyHandlers::new(enter, activate, record, submit);
    let admin = AdminHandlers::new(generate, timeline, overview, segments);

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/survey", survey_routes(survey))
        .nest("/api/admin", admin_routes(admin))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn health() -> &'static str {
    "ok"
}
