pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use serde_json::json;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::checkout::CheckoutService;
use application::clinical::ClinicalService;

pub use db::{create_pool, DbPool};

pub const CHECKOUT_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/checkout");
pub const CLINICAL_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/clinical");

/// Run any pending migrations against the checkout database.
pub fn run_checkout_migrations(pool: &DbPool) {
    let mut conn = pool
        .get()
        .expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(CHECKOUT_MIGRATIONS)
        .expect("Failed to run checkout database migrations");
}

/// Run any pending migrations against the clinical database.
pub fn run_clinical_migrations(pool: &DbPool) {
    let mut conn = pool
        .get()
        .expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(CLINICAL_MIGRATIONS)
        .expect("Failed to run clinical database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::records::measurements,
        handlers::records::vital_signs,
        handlers::records::biochemical_results,
        handlers::records::nutrition_plans,
        handlers::orders::create_order,
        handlers::orders::capture_order,
    ),
    components(schemas(
        handlers::auth::LoginRequest,
        handlers::auth::LoginResponse,
        handlers::auth::UserResponse,
        handlers::orders::CartItemRequest,
        handlers::orders::CustomerRequest,
        handlers::orders::CreateOrderRequest,
        handlers::orders::CreateOrderResponse,
    )),
    tags(
        (name = "clinical", description = "Login and clinical record reads"),
        (name = "checkout", description = "Order creation and payment capture"),
    )
)]
pub struct ApiDoc;

/// Rewrites actix's JSON deserialization failures into the `{"error"}` shape
/// the checkout clients expect.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "error": message })),
        )
        .into()
    })
}

/// Same rewrite for path-parameter failures (e.g. a non-numeric folio).
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "error": message })),
        )
        .into()
    })
}

/// Route table, shared by `build_server` and the API tests.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(handlers::auth::login))
        .route(
            "/mediciones/{folio}",
            web::get().to(handlers::records::measurements),
        )
        .route(
            "/signos_vitales/{folio}",
            web::get().to(handlers::records::vital_signs),
        )
        .route(
            "/bioquimicos/{folio}",
            web::get().to(handlers::records::biochemical_results),
        )
        .route(
            "/plan_nutricional/{folio}",
            web::get().to(handlers::records::nutrition_plans),
        )
        .service(
            web::scope("/api/orders")
                .route("", web::post().to(handlers::orders::create_order))
                .route(
                    "/{order_id}/capture",
                    web::post().to(handlers::orders::capture_order),
                ),
        );
}

fn cors_for(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials();
    for origin in origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    checkout: web::Data<CheckoutService>,
    clinical: web::Data<ClinicalService>,
    allowed_origins: Vec<String>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(checkout.clone())
            .app_data(clinical.clone())
            .app_data(json_config())
            .app_data(path_config())
            .wrap(cors_for(&allowed_origins))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(configure_api)
    })
    .bind((host.to_string(), port))?
    .run())
}
