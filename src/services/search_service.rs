// ==================== SEARCH ====================
// Busca unificada: usuários por nome/skills e projetos por título/tecnologias.

use crate::{
    database::Store,
    models::SearchResults,
    services::{project_service, user_service},
    utils::error::AppError,
};

/// Qualquer falha numa sub-busca aborta a busca inteira.
pub async fn search(db: &dyn Store, query: &str) -> Result<SearchResults, AppError> {
    let by_name = user_service::search_by_name(db, query).await?;
    let by_skills = user_service::search_by_skills(db, query).await?;
    let users = project_service::merge_unique(by_name, by_skills, |u| u.id);

    let projects = project_service::search_projects(db, query).await?;

    log::debug!(
        "🔍 Search '{}': {} users, {} projects",
        query,
        users.len(),
        projects.len()
    );

    Ok(SearchResults { users, projects })
}
