use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Devfolio API",
        version = "1.0.0",
        description = "Developer portfolio backend: users, projects and peer reviews.\n\n**Authentication:** create, update and delete endpoints require a JWT Bearer token from `/api/v1/auth/login` or `/api/v1/auth/register`. Reads are public.",
    ),
    paths(
        // Auth
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::auth::verify_token,
        crate::api::auth::get_me,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        // Projects
        crate::api::projects::list_projects,
        crate::api::projects::get_project,
        crate::api::projects::list_user_projects,
        crate::api::projects::create_project,
        crate::api::projects::update_project,
        crate::api::projects::delete_project,

        // Reviews
        crate::api::reviews::list_reviews,
        crate::api::reviews::get_review,
        crate::api::reviews::list_user_reviews,
        crate::api::reviews::create_review,
        crate::api::reviews::update_review,
        crate::api::reviews::delete_review,

        // Search
        crate::api::search::search,
    ),
    components(
        schemas(
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::AuthResponse,
            crate::services::auth_service::VerifyTokenResponse,
            crate::api::health::HealthResponse,
            crate::models::CreateUserRequest,
            crate::models::UpdateUserRequest,
            crate::models::UserResponse,
            crate::models::Social,
            crate::models::ProjectRequest,
            crate::models::ProjectResponse,
            crate::models::CreateReviewRequest,
            crate::models::UpdateReviewRequest,
            crate::models::ReviewResponse,
            crate::models::SearchResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and token introspection."),
        (name = "Health", description = "Liveness and request metrics."),
        (name = "Users", description = "Developer profiles. Ratings are derived from reviews."),
        (name = "Projects", description = "Portfolio projects owned by a user."),
        (name = "Reviews", description = "Peer reviews between users."),
        (name = "Search", description = "Unified search across users and projects."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
