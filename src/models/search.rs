use serde::{Deserialize, Serialize};

use super::{Project, ProjectResponse, User, UserResponse};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Texto livre buscado em nome/skills de usuários e título/tecnologias de projetos
    pub q: Option<String>,
}

/// Resultado composto da busca unificada
#[derive(Debug, Default)]
pub struct SearchResults {
    pub users: Vec<User>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SearchResponse {
    pub users: Vec<UserResponse>,
    pub projects: Vec<ProjectResponse>,
}

impl From<SearchResults> for SearchResponse {
    fn from(results: SearchResults) -> Self {
        SearchResponse {
            users: results.users.into_iter().map(UserResponse::from).collect(),
            projects: results.projects.into_iter().map(ProjectResponse::from).collect(),
        }
    }
}
