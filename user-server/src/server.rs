use crate::application::user_service::UserService;
use crate::domain::error::DomainError;
use crate::domain::validation::FieldError;
use crate::infrastructure::config::AppConfig;
use crate::presentation::handlers;
use crate::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use actix_web::error::JsonPayloadError;
use actix_web::middleware::Logger;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, Responder, web};
use tracing::{info, warn};

/// Registers the user routes, the JSON extractor settings and the shared
/// service. Used by [`run`] and by the HTTP tests.
pub fn configure(service: UserService) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(service))
            .app_data(json_config())
            .route("/test", web::get().to(test_route))
            .service(handlers::user::scope());
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(malformed_body)
}

fn malformed_body(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = %req.path(), error = %err, "rejected request body");
    DomainError::Validation(vec![FieldError::body(err.to_string())]).into()
}

async fn test_route() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Test route working")
}

pub async fn run(service: UserService, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = (config.host.clone(), config.port);

    info!(host = %bind_address.0, port = bind_address.1, "HTTP server starting");

    HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .configure(configure(service.clone()))
    })
    .bind(bind_address)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
