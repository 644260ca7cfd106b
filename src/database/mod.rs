use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::{Client, Collection, Database, IndexModel};

use crate::models::{Project, Review, User};
use crate::utils::error::AppError;

pub mod repository;
#[cfg(test)]
pub mod memory;

pub use repository::*;

const USERS: &str = "users";
const PROJECTS: &str = "projects";
const REVIEWS: &str = "reviews";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the lookup indexes. `users.email` is not unique here;
    /// user_service checks it before insert.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let indexes = [
            (USERS, doc! { "email": 1 }),
            (PROJECTS, doc! { "user_id": 1 }),
            (REVIEWS, doc! { "user_id": 1 }),
            (REVIEWS, doc! { "reviewer_id": 1 }),
        ];

        for (collection, keys) in indexes {
            let label = format!("{}({})", collection, keys.keys().cloned().collect::<Vec<_>>().join(", "));
            let index = IndexModel::builder().keys(keys).build();

            match self.collection::<Document>(collection).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}", label),
                Err(e) => log::debug!("   ℹ️  Index already exists: {} ({})", label, e),
            }
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

}

/// `{ field: { $regex: <escaped>, $options: "i" } }`: literal, case-insensitive substring
fn contains_filter(field: &str, query: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(field, doc! { "$regex": regex::escape(query), "$options": "i" });
    filter
}

fn inserted_id(id: Bson) -> Result<ObjectId, AppError> {
    id.as_object_id()
        .ok_or_else(|| AppError::internal("Inserted document has no ObjectId"))
}

fn require_id(id: Option<ObjectId>, entity: &str) -> Result<ObjectId, AppError> {
    id.ok_or_else(|| AppError::internal(format!("Cannot write {} without an id", entity)))
}

#[async_trait]
impl UserRepository for MongoDB {
    async fn find_all_users(&self) -> RepoResult<Vec<User>> {
        let cursor = self.collection::<User>(USERS).find(doc! {}).await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn find_user_by_id(&self, id: &ObjectId) -> RepoResult<Option<User>> {
        Ok(self.collection::<User>(USERS).find_one(doc! { "_id": *id }).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.collection::<User>(USERS).find_one(doc! { "email": email }).await?)
    }

    async fn insert_user(&self, user: &User) -> RepoResult<ObjectId> {
        let result = self.collection::<User>(USERS).insert_one(user).await?;
        inserted_id(result.inserted_id)
    }

    async fn update_user_profile(&self, user: &User) -> RepoResult<bool> {
        let id = require_id(user.id, "user")?;
        let social = mongodb::bson::to_bson(&user.social)
            .map_err(|e| AppError::internal(format!("Failed to encode social links: {}", e)))?;

        let update = doc! {
            "$set": {
                "name": &user.name,
                "email": &user.email,
                "password": &user.password,
                "title": &user.title,
                "bio": &user.bio,
                "avatar": &user.avatar,
                "skills": user.skills.clone(),
                "social": social,
                "updated_at": user.updated_at,
            }
        };

        let result = self
            .collection::<User>(USERS)
            .update_one(doc! { "_id": id }, update)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn set_user_rating(&self, id: &ObjectId, rating: f64, updated_at: i64) -> RepoResult<bool> {
        let result = self
            .collection::<User>(USERS)
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "rating": rating, "updated_at": updated_at } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_user(&self, id: &ObjectId) -> RepoResult<u64> {
        let result = self.collection::<User>(USERS).delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count)
    }

    async fn search_users_by_name(&self, query: &str) -> RepoResult<Vec<User>> {
        let cursor = self
            .collection::<User>(USERS)
            .find(contains_filter("name", query))
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn search_users_by_skills(&self, query: &str) -> RepoResult<Vec<User>> {
        let cursor = self
            .collection::<User>(USERS)
            .find(contains_filter("skills", query))
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }
}

#[async_trait]
impl ProjectRepository for MongoDB {
    async fn find_all_projects(&self) -> RepoResult<Vec<Project>> {
        let cursor = self.collection::<Project>(PROJECTS).find(doc! {}).await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn find_project_by_id(&self, id: &ObjectId) -> RepoResult<Option<Project>> {
        Ok(self.collection::<Project>(PROJECTS).find_one(doc! { "_id": *id }).await?)
    }

    async fn find_projects_by_user(&self, user_id: &ObjectId) -> RepoResult<Vec<Project>> {
        let cursor = self
            .collection::<Project>(PROJECTS)
            .find(doc! { "user_id": *user_id })
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn insert_project(&self, project: &Project) -> RepoResult<ObjectId> {
        let result = self.collection::<Project>(PROJECTS).insert_one(project).await?;
        inserted_id(result.inserted_id)
    }

    async fn replace_project(&self, project: &Project) -> RepoResult<bool> {
        let id = require_id(project.id, "project")?;
        let result = self
            .collection::<Project>(PROJECTS)
            .replace_one(doc! { "_id": id }, project)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_project(&self, id: &ObjectId) -> RepoResult<u64> {
        let result = self
            .collection::<Project>(PROJECTS)
            .delete_one(doc! { "_id": *id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn delete_projects_by_user(&self, user_id: &ObjectId) -> RepoResult<u64> {
        let result = self
            .collection::<Project>(PROJECTS)
            .delete_many(doc! { "user_id": *user_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn search_projects_by_title(&self, query: &str) -> RepoResult<Vec<Project>> {
        let cursor = self
            .collection::<Project>(PROJECTS)
            .find(contains_filter("title", query))
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn search_projects_by_technology(&self, query: &str) -> RepoResult<Vec<Project>> {
        let cursor = self
            .collection::<Project>(PROJECTS)
            .find(contains_filter("technologies", query))
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }
}

#[async_trait]
impl ReviewRepository for MongoDB {
    async fn find_all_reviews(&self) -> RepoResult<Vec<Review>> {
        let cursor = self.collection::<Review>(REVIEWS).find(doc! {}).await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn find_review_by_id(&self, id: &ObjectId) -> RepoResult<Option<Review>> {
        Ok(self.collection::<Review>(REVIEWS).find_one(doc! { "_id": *id }).await?)
    }

    async fn find_reviews_by_user(&self, user_id: &ObjectId) -> RepoResult<Vec<Review>> {
        let cursor = self
            .collection::<Review>(REVIEWS)
            .find(doc! { "user_id": *user_id })
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn find_reviews_by_reviewer(&self, reviewer_id: &ObjectId) -> RepoResult<Vec<Review>> {
        let cursor = self
            .collection::<Review>(REVIEWS)
            .find(doc! { "reviewer_id": *reviewer_id })
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn insert_review(&self, review: &Review) -> RepoResult<ObjectId> {
        let result = self.collection::<Review>(REVIEWS).insert_one(review).await?;
        inserted_id(result.inserted_id)
    }

    async fn replace_review(&self, review: &Review) -> RepoResult<bool> {
        let id = require_id(review.id, "review")?;
        let result = self
            .collection::<Review>(REVIEWS)
            .replace_one(doc! { "_id": id }, review)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_review(&self, id: &ObjectId) -> RepoResult<u64> {
        let result = self
            .collection::<Review>(REVIEWS)
            .delete_one(doc! { "_id": *id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn delete_reviews_involving(&self, user_id: &ObjectId) -> RepoResult<u64> {
        let result = self
            .collection::<Review>(REVIEWS)
            .delete_many(doc! {
                "$or": [
                    { "user_id": *user_id },
                    { "reviewer_id": *user_id }
                ]
            })
            .await?;
        Ok(result.deleted_count)
    }

    async fn average_rating(&self, user_id: &ObjectId) -> RepoResult<Option<f64>> {
        let pipeline = vec![
            doc! { "$match": { "user_id": *user_id } },
            doc! { "$group": { "_id": Bson::Null, "average_rating": { "$avg": "$rating" } } },
        ];

        let mut cursor = self.collection::<Review>(REVIEWS).aggregate(pipeline).await?;

        // Sem reviews o $group não emite documento
        match cursor.try_next().await? {
            Some(result) => Ok(result.get("average_rating").and_then(Bson::as_f64)),
            None => Ok(None),
        }
    }
}
