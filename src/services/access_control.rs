// Checagem de dono antes de qualquer mutação.
// O id do chamador vem do `sub` do token já validado pelo AuthMiddleware.

use mongodb::bson::oid::ObjectId;

use crate::{
    database::Store,
    models::{Project, Review},
    services::{project_service, review_service},
    utils::error::AppError,
};

/// Carrega o projeto e exige que o chamador seja o dono
pub async fn authorize_project(
    db: &dyn Store,
    id: &ObjectId,
    caller: &ObjectId,
) -> Result<Project, AppError> {
    let project = project_service::get_project(db, id).await?;

    if &project.user_id != caller {
        log::warn!(
            "🚫 User {} tried to modify project {} owned by {}",
            caller.to_hex(),
            id.to_hex(),
            project.user_id.to_hex()
        );
        return Err(AppError::forbidden("You can only modify your own projects"));
    }

    Ok(project)
}

/// Carrega a review e exige que o chamador seja o autor
pub async fn authorize_review(
    db: &dyn Store,
    id: &ObjectId,
    caller: &ObjectId,
) -> Result<Review, AppError> {
    let review = review_service::get_review(db, id).await?;

    if &review.reviewer_id != caller {
        log::warn!(
            "🚫 User {} tried to modify review {} written by {}",
            caller.to_hex(),
            id.to_hex(),
            review.reviewer_id.to_hex()
        );
        return Err(AppError::forbidden("You can only modify your own reviews"));
    }

    Ok(review)
}

pub fn authorize_user(target: &ObjectId, caller: &ObjectId) -> Result<(), AppError> {
    if target != caller {
        log::warn!(
            "🚫 User {} tried to modify user {}",
            caller.to_hex(),
            target.to_hex()
        );
        return Err(AppError::forbidden("You can only modify your own profile"));
    }
    Ok(())
}
