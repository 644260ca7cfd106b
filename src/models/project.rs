use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Projeto de portfólio (armazenado no MongoDB, coleção `projects`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: String,

    /// Ordem definida pelo dono
    #[serde(default)]
    pub technologies: Vec<String>,

    #[serde(default)]
    pub github_url: String,

    #[serde(default)]
    pub live_url: String,

    /// Dono do projeto
    pub user_id: ObjectId,

    /// Copiados do dono no create/update (podem ficar desatualizados)
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_avatar: String,

    pub created_at: i64,

    pub updated_at: i64,
}

/// Request para criar/atualizar projeto. O dono vem do token.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub live_url: String,
}

impl ProjectRequest {
    pub fn into_project(self, user_id: ObjectId) -> Project {
        Project {
            id: None,
            title: self.title,
            description: self.description,
            image: self.image,
            technologies: self.technologies,
            github_url: self.github_url,
            live_url: self.live_url,
            user_id,
            user_name: String::new(),
            user_avatar: String::new(),
            created_at: 0,
            updated_at: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub github_url: String,
    pub live_url: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        ProjectResponse {
            id: project.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: project.title,
            description: project.description,
            image: project.image,
            technologies: project.technologies,
            github_url: project.github_url,
            live_url: project.live_url,
            user_id: project.user_id.to_hex(),
            user_name: project.user_name,
            user_avatar: project.user_avatar,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}
