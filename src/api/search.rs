use actix_web::{web, HttpResponse};

use crate::database::Store;
use crate::models::{SearchQuery, SearchResponse};
use crate::services::search_service;
use crate::utils::error::AppError;

/// GET /api/v1/search?q= - usuários (nome/skills) e projetos (título/tecnologias)
#[utoipa::path(
    get,
    path = "/api/v1/search",
    tag = "Search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching users and projects", body = SearchResponse),
        (status = 400, description = "Missing query parameter 'q'")
    )
)]
pub async fn search(
    db: web::Data<dyn Store>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let q = query.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(AppError::bad_request("Query parameter 'q' is required"));
    }

    let results = search_service::search(db.get_ref(), q).await?;
    Ok(HttpResponse::Ok().json(SearchResponse::from(results)))
}
