use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use health_registry::bootstrap::app_context::{AppContext, AppServices};
use health_registry::bootstrap::config::Config;
use health_registry::infrastructure::db;
use health_registry::infrastructure::db::repositories::client_repository_sqlx::SqlxClientRepository;
use health_registry::infrastructure::db::repositories::enrollment_repository_sqlx::SqlxEnrollmentRepository;
use health_registry::infrastructure::db::repositories::program_repository_sqlx::SqlxProgramRepository;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            health_registry::presentation::http::programs::list_programs,
            health_registry::presentation::http::programs::create_program,
            health_registry::presentation::http::programs::get_program,
            health_registry::presentation::http::programs::update_program,
            health_registry::presentation::http::programs::patch_program,
            health_registry::presentation::http::programs::delete_program,
            health_registry::presentation::http::clients::list_clients,
            health_registry::presentation::http::clients::create_client,
            health_registry::presentation::http::clients::get_client,
            health_registry::presentation::http::clients::update_client,
            health_registry::presentation::http::clients::patch_client,
            health_registry::presentation::http::clients::delete_client,
            health_registry::presentation::http::clients::enroll_client,
            health_registry::presentation::http::clients::list_enrollments_for_client,
            health_registry::presentation::http::enrollments::list_enrollments,
            health_registry::presentation::http::enrollments::create_enrollment,
            health_registry::presentation::http::enrollments::get_enrollment,
            health_registry::presentation::http::enrollments::update_enrollment,
            health_registry::presentation::http::enrollments::patch_enrollment,
            health_registry::presentation::http::enrollments::delete_enrollment,
            health_registry::presentation::http::health::health,
        ),
        components(schemas(
            health_registry::domain::client::Gender,
            health_registry::presentation::http::programs::Program,
            health_registry::presentation::http::programs::CreateProgramRequest,
            health_registry::presentation::http::programs::UpdateProgramRequest,
            health_registry::presentation::http::clients::Client,
            health_registry::presentation::http::clients::ClientDetail,
            health_registry::presentation::http::clients::CreateClientRequest,
            health_registry::presentation::http::clients::UpdateClientRequest,
            health_registry::presentation::http::clients::EnrollRequest,
            health_registry::presentation::http::enrollments::Enrollment,
            health_registry::presentation::http::enrollments::CreateEnrollmentRequest,
            health_registry::presentation::http::enrollments::UpdateEnrollmentRequest,
            health_registry::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Programs", description = "Health program management"),
            (name = "Clients", description = "Client registry and enrollment actions"),
            (name = "Enrollments", description = "Enrollment records"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "health_registry=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting health registry backend");

    let pool = db::connect_pool(&cfg.database_url).await?;
    db::migrate(&pool).await?;

    let program_repo = Arc::new(SqlxProgramRepository::new(pool.clone()));
    let client_repo = Arc::new(SqlxClientRepository::new(pool.clone()));
    let enrollment_repo = Arc::new(SqlxEnrollmentRepository::new(pool.clone()));

    let services = AppServices::new(program_repo, client_repo, enrollment_repo);
    let ctx = AppContext::new(cfg.clone(), services);

    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers([http::header::CONTENT_TYPE])
            .allow_credentials(true),
        _ if cfg.is_production => {
            // FRONTEND_URL is enforced earlier in production; fall back to
            // a deny-all origin rather than mirroring.
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(HeaderValue::from_static(
                    "http://invalid",
                )))
                .allow_methods(methods)
                .allow_headers([http::header::CONTENT_TYPE])
        }
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers([http::header::CONTENT_TYPE])
            .allow_credentials(true),
    };

    let app = Router::new()
        .nest(
            "/api",
            health_registry::presentation::http::health::routes(pool.clone()),
        )
        .nest(
            "/api",
            health_registry::presentation::http::programs::routes(ctx.clone()),
        )
        .nest(
            "/api",
            health_registry::presentation::http::clients::routes(ctx.clone()),
        )
        .nest(
            "/api",
            health_registry::presentation::http::enrollments::routes(ctx.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
