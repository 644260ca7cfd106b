use actix_web::{web, HttpResponse};

use crate::config::AppConfig;
use crate::database::Store;
use crate::middleware::auth::Claims;
use crate::models::{CreateUserRequest, UserResponse};
use crate::services::auth_service::{self, AuthResponse, LoginRequest, VerifyTokenResponse};
use crate::utils::error::AppError;

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Missing name, email or password"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    db: web::Data<dyn Store>,
    config: web::Data<AppConfig>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /auth/register - email: {}", request.email);

    let response = auth_service::register(db.get_ref(), &config, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    db: web::Data<dyn Store>,
    config: web::Data<AppConfig>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 POST /auth/login - email: {}", request.email);

    match auth_service::login(db.get_ref(), &config, &request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", request.email);
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", request.email, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/verify",
    tag = "Auth",
    responses(
        (status = 200, description = "Token is valid", body = VerifyTokenResponse),
        (status = 401, description = "Invalid or expired token")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn verify_token(claims: web::ReqData<Claims>) -> HttpResponse {
    HttpResponse::Ok().json(VerifyTokenResponse {
        success: true,
        valid: true,
        user_id: claims.sub.clone(),
        email: claims.email.clone(),
        exp: claims.exp,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User no longer exists")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    db: web::Data<dyn Store>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let user = auth_service::get_current_user(db.get_ref(), &claims).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
