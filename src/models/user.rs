use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Usuário (armazenado no MongoDB, coleção `users`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    pub email: String,

    /// Hash bcrypt; nunca sai na resposta
    pub password: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub bio: String,

    #[serde(default)]
    pub avatar: String,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub social: Social,

    /// Média das reviews recebidas; só o review_service altera
    #[serde(default)]
    pub rating: f64,

    pub created_at: i64,

    pub updated_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Social {
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub website: String,
}

/// Request para criar usuário (também usado no registro)
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub social: Social,
}

/// Request para atualizar usuário. Campos ausentes ficam como estão.
/// Sem `rating`: só o review_service altera a nota.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Vazio ou ausente mantém o hash atual
    pub password: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: Option<Social>,
}

/// Response de usuário (sem senha)
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub title: String,
    pub bio: String,
    pub avatar: String,
    pub skills: Vec<String>,
    pub social: Social,
    pub rating: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            email: user.email,
            title: user.title,
            bio: user.bio,
            avatar: user.avatar,
            skills: user.skills,
            social: user.social,
            rating: user.rating,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
