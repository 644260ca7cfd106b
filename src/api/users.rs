use actix_web::{web, HttpResponse};

use super::{deleted, parse_object_id};
use crate::config::AppConfig;
use crate::database::Store;
use crate::middleware::auth::Claims;
use crate::models::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::services::{access_control, user_service};
use crate::utils::error::AppError;

/// GET /api/v1/users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses((status = 200, description = "All users", body = [UserResponse]))
)]
pub async fn list_users(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let users = user_service::list_users(db.get_ref()).await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(users))
}

/// GET /api/v1/users/{id}
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    db: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "user")?;
    let user = user_service::get_user(db.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// POST /api/v1/users - cadastro sem emitir token
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing name, email or password"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    db: web::Data<dyn Store>,
    config: web::Data<AppConfig>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::create_user(db.get_ref(), request.into_inner(), config.bcrypt_cost).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// PUT /api/v1/users/{id} - só o próprio usuário
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    claims: web::ReqData<Claims>,
    db: web::Data<dyn Store>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "user")?;
    access_control::authorize_user(&id, &claims.user_id()?)?;

    let user =
        user_service::update_user(db.get_ref(), &id, request.into_inner(), config.bcrypt_cost).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// DELETE /api/v1/users/{id} - remove conta, projetos e reviews
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    claims: web::ReqData<Claims>,
    db: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "user")?;
    access_control::authorize_user(&id, &claims.user_id()?)?;

    user_service::delete_user(db.get_ref(), &id).await?;
    Ok(deleted("User deleted successfully"))
}
