// ==================== REVIEWS ====================
// CRUD de reviews. Nome/avatar do autor são copiados no momento da escrita
// e toda escrita recalcula a nota média do usuário avaliado.

use mongodb::bson::oid::ObjectId;

use crate::{
    database::{ReviewRepository, Store, UserRepository},
    models::{Review, UpdateReviewRequest},
    utils::error::AppError,
};

pub async fn list_reviews(db: &dyn Store) -> Result<Vec<Review>, AppError> {
    db.find_all_reviews().await
}

pub async fn get_review(db: &dyn Store, id: &ObjectId) -> Result<Review, AppError> {
    db.find_review_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))
}

/// Reviews recebidas por `user_id`
pub async fn list_by_user(db: &dyn Store, user_id: &ObjectId) -> Result<Vec<Review>, AppError> {
    db.find_reviews_by_user(user_id).await
}

/// Cria review. `reviewer_id != user_id` é validado antes, na borda HTTP.
pub async fn create_review(db: &dyn Store, mut review: Review) -> Result<Review, AppError> {
    let reviewer = db
        .find_user_by_id(&review.reviewer_id)
        .await?
        .ok_or_else(|| AppError::not_found("Reviewer not found"))?;

    if db.find_user_by_id(&review.user_id).await?.is_none() {
        return Err(AppError::not_found("Reviewed user not found"));
    }

    review.reviewer_name = reviewer.name;
    review.reviewer_avatar = reviewer.avatar;

    let now = chrono::Utc::now().timestamp();
    review.created_at = now;
    review.updated_at = now;

    review.id = Some(db.insert_review(&review).await?);
    log::info!(
        "✅ Review {} created for user {}",
        review.id.map(|id| id.to_hex()).unwrap_or_default(),
        review.user_id.to_hex()
    );

    refresh_rating(db, &review.user_id).await;

    Ok(review)
}

/// Substitui nota e conteúdo; ids, autor e `created_at` ficam.
pub async fn update_review(
    db: &dyn Store,
    id: &ObjectId,
    changes: UpdateReviewRequest,
) -> Result<Review, AppError> {
    let mut review = get_review(db, id).await?;

    review.rating = changes.rating;
    review.content = changes.content;
    review.updated_at = chrono::Utc::now().timestamp();

    if !db.replace_review(&review).await? {
        return Err(AppError::not_found("Review not found"));
    }

    refresh_rating(db, &review.user_id).await;

    Ok(review)
}

pub async fn delete_review(db: &dyn Store, id: &ObjectId) -> Result<(), AppError> {
    let review = get_review(db, id).await?;

    db.delete_review(id).await?;
    log::info!("🗑️ Review {} deleted", id.to_hex());

    refresh_rating(db, &review.user_id).await;

    Ok(())
}

/// Recalcula `rating` do usuário como a média das reviews recebidas
/// (0 sem reviews). Único caminho que altera `User.rating`.
pub async fn recompute_rating(db: &dyn Store, user_id: &ObjectId) -> Result<f64, AppError> {
    let average = db.average_rating(user_id).await?.unwrap_or(0.0);

    // Só `rating`/`updated_at`: não regrava perfil nem senha
    if !db
        .set_user_rating(user_id, average, chrono::Utc::now().timestamp())
        .await?
    {
        return Err(AppError::not_found("User not found"));
    }

    Ok(average)
}

/// Best-effort: falha no recálculo não desfaz a escrita da review, só loga.
/// A nota fica desatualizada até a próxima escrita de review.
pub async fn refresh_rating(db: &dyn Store, user_id: &ObjectId) {
    match recompute_rating(db, user_id).await {
        Ok(rating) => log::debug!("⭐ Rating for {} is now {:.2}", user_id.to_hex(), rating),
        Err(e) => log::warn!("⚠️  Failed to recompute rating for {}: {}", user_id.to_hex(), e),
    }
}
