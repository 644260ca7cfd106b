pub mod auth;
pub mod health;
pub mod metrics;
pub mod projects;
pub mod reviews;
pub mod search;
pub mod swagger;
pub mod users;


use actix_web::{web, HttpResponse};
use mongodb::bson::oid::ObjectId;

use crate::{middleware::AuthMiddleware, utils::error::AppError};

/// Tabela de rotas. Usada pelo `main` e pelos testes de rota.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(
            web::scope("/api/v1")
                .wrap(AuthMiddleware)
                // Auth endpoints
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/verify", web::get().to(auth::verify_token))
                        .route("/me", web::get().to(auth::get_me)),
                )
                // ==================== USERS ====================
                .service(
                    web::scope("/users")
                        .route("", web::get().to(users::list_users))
                        .route("", web::post().to(users::create_user))
                        .route("/{id}", web::get().to(users::get_user))
                        .route("/{id}", web::put().to(users::update_user))
                        .route("/{id}", web::delete().to(users::delete_user)),
                )
                // ==================== PROJECTS ====================
                .service(
                    web::scope("/projects")
                        .route("", web::get().to(projects::list_projects))
                        .route("", web::post().to(projects::create_project))
                        .route("/user/{user_id}", web::get().to(projects::list_user_projects))
                        .route("/{id}", web::get().to(projects::get_project))
                        .route("/{id}", web::put().to(projects::update_project))
                        .route("/{id}", web::delete().to(projects::delete_project)),
                )
                // ==================== REVIEWS ====================
                .service(
                    web::scope("/reviews")
                        .route("", web::get().to(reviews::list_reviews))
                        .route("", web::post().to(reviews::create_review))
                        .route("/user/{user_id}", web::get().to(reviews::list_user_reviews))
                        .route("/{id}", web::get().to(reviews::get_review))
                        .route("/{id}", web::put().to(reviews::update_review))
                        .route("/{id}", web::delete().to(reviews::delete_review)),
                )
                // ==================== SEARCH ====================
                .route("/search", web::get().to(search::search)),
        );
}

// Body JSON inválido vira 400 no mesmo formato dos outros erros
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::bad_request(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::bad_request(err.to_string()).into())
}

/// Converte o id do path; id malformado é 400
pub fn parse_object_id(raw: &str, entity: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::bad_request(format!("Invalid {} ID", entity)))
}

/// Resposta padrão de delete
pub fn deleted(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": message
    }))
}
