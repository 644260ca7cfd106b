use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// Review de um usuário sobre outro (coleção `reviews`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Usuário avaliado
    pub user_id: ObjectId,

    /// Autor da review
    pub reviewer_id: ObjectId,

    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_avatar: String,

    pub rating: f64,

    #[serde(default)]
    pub content: String,

    pub created_at: i64,

    pub updated_at: i64,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    /// Usuário avaliado (hex ObjectId)
    pub user_id: String,
    pub rating: f64,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct UpdateReviewRequest {
    pub rating: f64,
    #[serde(default)]
    pub content: String,
}

/// Nota precisa ser finita e estar entre 1 e 5
pub fn is_valid_rating(rating: f64) -> bool {
    rating.is_finite() && (MIN_RATING..=MAX_RATING).contains(&rating)
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub user_id: String,
    pub reviewer_id: String,
    pub reviewer_name: String,
    pub reviewer_avatar: String,
    pub rating: f64,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            id: review.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: review.user_id.to_hex(),
            reviewer_id: review.reviewer_id.to_hex(),
            reviewer_name: review.reviewer_name,
            reviewer_avatar: review.reviewer_avatar,
            rating: review.rating,
            content: review.content,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}
