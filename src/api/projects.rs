use actix_web::{web, HttpResponse};

use super::{deleted, parse_object_id};
use crate::database::Store;
use crate::middleware::auth::Claims;
use crate::models::{Project, ProjectRequest, ProjectResponse};
use crate::services::{access_control, project_service};
use crate::utils::error::AppError;

fn to_responses(projects: Vec<Project>) -> Vec<ProjectResponse> {
    projects.into_iter().map(ProjectResponse::from).collect()
}

fn validate(request: &ProjectRequest) -> Result<(), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::bad_request("Project title is required"));
    }
    Ok(())
}

/// GET /api/v1/projects
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "Projects",
    responses((status = 200, description = "All projects", body = [ProjectResponse]))
)]
pub async fn list_projects(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let projects = project_service::list_projects(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(to_responses(projects)))
}

/// GET /api/v1/projects/{id}
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project found", body = ProjectResponse),
        (status = 400, description = "Invalid project ID"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    db: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "project")?;
    let project = project_service::get_project(db.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(ProjectResponse::from(project)))
}

/// GET /api/v1/projects/user/{user_id}
#[utoipa::path(
    get,
    path = "/api/v1/projects/user/{user_id}",
    tag = "Projects",
    params(("user_id" = String, Path, description = "Owner user ID")),
    responses(
        (status = 200, description = "Projects owned by the user", body = [ProjectResponse]),
        (status = 400, description = "Invalid user ID")
    )
)]
pub async fn list_user_projects(
    db: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = parse_object_id(&path, "user")?;
    let projects = project_service::list_by_user(db.get_ref(), &user_id).await?;
    Ok(HttpResponse::Ok().json(to_responses(projects)))
}

/// POST /api/v1/projects - dono = usuário do token
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "Projects",
    request_body = ProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid body"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Owner not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_project(
    claims: web::ReqData<Claims>,
    db: web::Data<dyn Store>,
    request: web::Json<ProjectRequest>,
) -> Result<HttpResponse, AppError> {
    let owner = claims.user_id()?;
    validate(&request)?;

    let project = project_service::create_project(db.get_ref(), request.into_inner().into_project(owner)).await?;
    Ok(HttpResponse::Created().json(ProjectResponse::from(project)))
}

/// PUT /api/v1/projects/{id} - só o dono
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(("id" = String, Path, description = "Project ID")),
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Project not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_project(
    claims: web::ReqData<Claims>,
    db: web::Data<dyn Store>,
    path: web::Path<String>,
    request: web::Json<ProjectRequest>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "project")?;
    let existing = access_control::authorize_project(db.get_ref(), &id, &claims.user_id()?).await?;
    validate(&request)?;

    let project = request.into_inner().into_project(existing.user_id);
    let updated = project_service::update_project(db.get_ref(), &id, project).await?;
    Ok(HttpResponse::Ok().json(ProjectResponse::from(updated)))
}

/// DELETE /api/v1/projects/{id} - só o dono
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Project not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_project(
    claims: web::ReqData<Claims>,
    db: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "project")?;
    access_control::authorize_project(db.get_ref(), &id, &claims.user_id()?).await?;

    project_service::delete_project(db.get_ref(), &id).await?;
    Ok(deleted("Project deleted successfully"))
}
