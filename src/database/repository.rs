use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{Project, Review, User};
use crate::utils::error::AppError;

pub type RepoResult<T> = Result<T, AppError>;

/// Persistência de usuários (coleção `users`)
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all_users(&self) -> RepoResult<Vec<User>>;
    async fn find_user_by_id(&self, id: &ObjectId) -> RepoResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    /// Returns the generated id
    async fn insert_user(&self, user: &User) -> RepoResult<ObjectId>;
    /// Writes profile fields and the password hash; `rating` and `created_at`
    /// are left untouched. `false` when nothing matched
    async fn update_user_profile(&self, user: &User) -> RepoResult<bool>;
    /// Writes only `rating` and `updated_at`
    async fn set_user_rating(&self, id: &ObjectId, rating: f64, updated_at: i64) -> RepoResult<bool>;
    async fn delete_user(&self, id: &ObjectId) -> RepoResult<u64>;
    /// Case-insensitive substring match on `name`
    async fn search_users_by_name(&self, query: &str) -> RepoResult<Vec<User>>;
    /// Case-insensitive substring match on any element of `skills`
    async fn search_users_by_skills(&self, query: &str) -> RepoResult<Vec<User>>;
}

/// Persistência de projetos (coleção `projects`)
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_all_projects(&self) -> RepoResult<Vec<Project>>;
    async fn find_project_by_id(&self, id: &ObjectId) -> RepoResult<Option<Project>>;
    async fn find_projects_by_user(&self, user_id: &ObjectId) -> RepoResult<Vec<Project>>;
    async fn insert_project(&self, project: &Project) -> RepoResult<ObjectId>;
    async fn replace_project(&self, project: &Project) -> RepoResult<bool>;
    async fn delete_project(&self, id: &ObjectId) -> RepoResult<u64>;
    async fn delete_projects_by_user(&self, user_id: &ObjectId) -> RepoResult<u64>;
    async fn search_projects_by_title(&self, query: &str) -> RepoResult<Vec<Project>>;
    async fn search_projects_by_technology(&self, query: &str) -> RepoResult<Vec<Project>>;
}

/// Persistência de reviews (coleção `reviews`)
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_all_reviews(&self) -> RepoResult<Vec<Review>>;
    async fn find_review_by_id(&self, id: &ObjectId) -> RepoResult<Option<Review>>;
    /// Reviews about `user_id`
    async fn find_reviews_by_user(&self, user_id: &ObjectId) -> RepoResult<Vec<Review>>;
    /// Reviews written by `reviewer_id`
    async fn find_reviews_by_reviewer(&self, reviewer_id: &ObjectId) -> RepoResult<Vec<Review>>;
    async fn insert_review(&self, review: &Review) -> RepoResult<ObjectId>;
    async fn replace_review(&self, review: &Review) -> RepoResult<bool>;
    async fn delete_review(&self, id: &ObjectId) -> RepoResult<u64>;
    /// Deletes reviews where the user is either the subject or the author
    async fn delete_reviews_involving(&self, user_id: &ObjectId) -> RepoResult<u64>;
    /// Mean `rating` of the reviews about `user_id`, `None` when there are none
    async fn average_rating(&self, user_id: &ObjectId) -> RepoResult<Option<f64>>;
}

/// Tudo que os services precisam do banco
pub trait Store: UserRepository + ProjectRepository + ReviewRepository {}

impl<T> Store for T where T: UserRepository + ProjectRepository + ReviewRepository {}
