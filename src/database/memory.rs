//! In-memory `Store` used by the service and route tests.
//!
//! Mirrors the MongoDB semantics the services rely on: insertion order is
//! kept, searches are case-insensitive substring matches, and replacing a
//! missing document reports `false`.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::repository::*;
use crate::models::{Project, Review, User};
use crate::utils::error::AppError;

#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    projects: RwLock<Vec<Project>>,
    reviews: RwLock<Vec<Review>>,
    fail_searches: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every search call fail, to exercise error propagation
    pub fn fail_searches(&self) {
        self.fail_searches.store(true, Ordering::SeqCst);
    }

    fn check_search(&self) -> RepoResult<()> {
        if self.fail_searches.load(Ordering::SeqCst) {
            return Err(AppError::internal("search backend unavailable"));
        }
        Ok(())
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_all_users(&self) -> RepoResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_user_by_id(&self, id: &ObjectId) -> RepoResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> RepoResult<ObjectId> {
        let id = ObjectId::new();
        let mut stored = user.clone();
        stored.id = Some(id);
        self.users.write().await.push(stored);
        Ok(id)
    }

    async fn update_user_profile(&self, user: &User) -> RepoResult<bool> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id.is_some() && u.id == user.id) {
            Some(slot) => {
                slot.name = user.name.clone();
                slot.email = user.email.clone();
                slot.password = user.password.clone();
                slot.title = user.title.clone();
                slot.bio = user.bio.clone();
                slot.avatar = user.avatar.clone();
                slot.skills = user.skills.clone();
                slot.social = user.social.clone();
                slot.updated_at = user.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_user_rating(&self, id: &ObjectId, rating: f64, updated_at: i64) -> RepoResult<bool> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id.as_ref() == Some(id)) {
            Some(slot) => {
                slot.rating = rating;
                slot.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_user(&self, id: &ObjectId) -> RepoResult<u64> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id.as_ref() != Some(id));
        Ok((before - users.len()) as u64)
    }

    async fn search_users_by_name(&self, query: &str) -> RepoResult<Vec<User>> {
        self.check_search()?;
        Ok(self.users.read().await.iter().filter(|u| contains(&u.name, query)).cloned().collect())
    }

    async fn search_users_by_skills(&self, query: &str) -> RepoResult<Vec<User>> {
        self.check_search()?;
        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|u| u.skills.iter().any(|s| contains(s, query)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn find_all_projects(&self) -> RepoResult<Vec<Project>> {
        Ok(self.projects.read().await.clone())
    }

    async fn find_project_by_id(&self, id: &ObjectId) -> RepoResult<Option<Project>> {
        Ok(self.projects.read().await.iter().find(|p| p.id.as_ref() == Some(id)).cloned())
    }

    async fn find_projects_by_user(&self, user_id: &ObjectId) -> RepoResult<Vec<Project>> {
        Ok(self.projects.read().await.iter().filter(|p| &p.user_id == user_id).cloned().collect())
    }

    async fn insert_project(&self, project: &Project) -> RepoResult<ObjectId> {
        let id = ObjectId::new();
        let mut stored = project.clone();
        stored.id = Some(id);
        self.projects.write().await.push(stored);
        Ok(id)
    }

    async fn replace_project(&self, project: &Project) -> RepoResult<bool> {
        let mut projects = self.projects.write().await;
        match projects.iter_mut().find(|p| p.id.is_some() && p.id == project.id) {
            Some(slot) => {
                *slot = project.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_project(&self, id: &ObjectId) -> RepoResult<u64> {
        let mut projects = self.projects.write().await;
        let before = projects.len();
        projects.retain(|p| p.id.as_ref() != Some(id));
        Ok((before - projects.len()) as u64)
    }

    async fn delete_projects_by_user(&self, user_id: &ObjectId) -> RepoResult<u64> {
        let mut projects = self.projects.write().await;
        let before = projects.len();
        projects.retain(|p| &p.user_id != user_id);
        Ok((before - projects.len()) as u64)
    }

    async fn search_projects_by_title(&self, query: &str) -> RepoResult<Vec<Project>> {
        self.check_search()?;
        Ok(self.projects.read().await.iter().filter(|p| contains(&p.title, query)).cloned().collect())
    }

    async fn search_projects_by_technology(&self, query: &str) -> RepoResult<Vec<Project>> {
        self.check_search()?;
        Ok(self
            .projects
            .read()
            .await
            .iter()
            .filter(|p| p.technologies.iter().any(|t| contains(t, query)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn find_all_reviews(&self) -> RepoResult<Vec<Review>> {
        Ok(self.reviews.read().await.clone())
    }

    async fn find_review_by_id(&self, id: &ObjectId) -> RepoResult<Option<Review>> {
        Ok(self.reviews.read().await.iter().find(|r| r.id.as_ref() == Some(id)).cloned())
    }

    async fn find_reviews_by_user(&self, user_id: &ObjectId) -> RepoResult<Vec<Review>> {
        Ok(self.reviews.read().await.iter().filter(|r| &r.user_id == user_id).cloned().collect())
    }

    async fn find_reviews_by_reviewer(&self, reviewer_id: &ObjectId) -> RepoResult<Vec<Review>> {
        Ok(self
            .reviews
            .read()
            .await
            .iter()
            .filter(|r| &r.reviewer_id == reviewer_id)
            .cloned()
            .collect())
    }

    async fn insert_review(&self, review: &Review) -> RepoResult<ObjectId> {
        let id = ObjectId::new();
        let mut stored = review.clone();
        stored.id = Some(id);
        self.reviews.write().await.push(stored);
        Ok(id)
    }

    async fn replace_review(&self, review: &Review) -> RepoResult<bool> {
        let mut reviews = self.reviews.write().await;
        match reviews.iter_mut().find(|r| r.id.is_some() && r.id == review.id) {
            Some(slot) => {
                *slot = review.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_review(&self, id: &ObjectId) -> RepoResult<u64> {
        let mut reviews = self.reviews.write().await;
        let before = reviews.len();
        reviews.retain(|r| r.id.as_ref() != Some(id));
        Ok((before - reviews.len()) as u64)
    }

    async fn delete_reviews_involving(&self, user_id: &ObjectId) -> RepoResult<u64> {
        let mut reviews = self.reviews.write().await;
        let before = reviews.len();
        reviews.retain(|r| &r.user_id != user_id && &r.reviewer_id != user_id);
        Ok((before - reviews.len()) as u64)
    }

    async fn average_rating(&self, user_id: &ObjectId) -> RepoResult<Option<f64>> {
        let reviews = self.reviews.read().await;
        let ratings: Vec<f64> = reviews
            .iter()
            .filter(|r| &r.user_id == user_id)
            .map(|r| r.rating)
            .collect();

        if ratings.is_empty() {
            return Ok(None);
        }
        Ok(Some(ratings.iter().sum::<f64>() / ratings.len() as f64))
    }
}
