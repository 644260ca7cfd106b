use actix_web::{web, HttpResponse};

use super::{deleted, parse_object_id};
use crate::database::Store;
use crate::middleware::auth::Claims;
use crate::models::{
    is_valid_rating, CreateReviewRequest, Review, ReviewResponse, UpdateReviewRequest, MAX_RATING,
    MIN_RATING,
};
use crate::services::{access_control, review_service};
use crate::utils::error::AppError;

fn to_responses(reviews: Vec<Review>) -> Vec<ReviewResponse> {
    reviews.into_iter().map(ReviewResponse::from).collect()
}

fn validate_rating(rating: f64) -> Result<(), AppError> {
    if !is_valid_rating(rating) {
        return Err(AppError::bad_request(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }
    Ok(())
}

/// GET /api/v1/reviews
#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    tag = "Reviews",
    responses((status = 200, description = "All reviews", body = [ReviewResponse]))
)]
pub async fn list_reviews(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let reviews = review_service::list_reviews(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(to_responses(reviews)))
}

/// GET /api/v1/reviews/{id}
#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    params(("id" = String, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review found", body = ReviewResponse),
        (status = 400, description = "Invalid review ID"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn get_review(
    db: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "review")?;
    let review = review_service::get_review(db.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(ReviewResponse::from(review)))
}

/// GET /api/v1/reviews/user/{user_id} - reviews recebidas
#[utoipa::path(
    get,
    path = "/api/v1/reviews/user/{user_id}",
    tag = "Reviews",
    params(("user_id" = String, Path, description = "Reviewed user ID")),
    responses(
        (status = 200, description = "Reviews about the user", body = [ReviewResponse]),
        (status = 400, description = "Invalid user ID")
    )
)]
pub async fn list_user_reviews(
    db: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = parse_object_id(&path, "user")?;
    let reviews = review_service::list_by_user(db.get_ref(), &user_id).await?;
    Ok(HttpResponse::Ok().json(to_responses(reviews)))
}

/// POST /api/v1/reviews - autor = usuário do token
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    tag = "Reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Self-review or rating out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Reviewer or reviewed user not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_review(
    claims: web::ReqData<Claims>,
    db: web::Data<dyn Store>,
    request: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let reviewer_id = claims.user_id()?;
    let request = request.into_inner();
    let user_id = parse_object_id(&request.user_id, "user")?;

    if user_id == reviewer_id {
        return Err(AppError::bad_request("You cannot review yourself"));
    }
    validate_rating(request.rating)?;

    let review = Review {
        id: None,
        user_id,
        reviewer_id,
        reviewer_name: String::new(),
        reviewer_avatar: String::new(),
        rating: request.rating,
        content: request.content,
        created_at: 0,
        updated_at: 0,
    };

    let created = review_service::create_review(db.get_ref(), review).await?;
    Ok(HttpResponse::Created().json(ReviewResponse::from(created)))
}

/// PUT /api/v1/reviews/{id} - só o autor
#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    params(("id" = String, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 400, description = "Rating out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_review(
    claims: web::ReqData<Claims>,
    db: web::Data<dyn Store>,
    path: web::Path<String>,
    request: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "review")?;
    access_control::authorize_review(db.get_ref(), &id, &claims.user_id()?).await?;
    validate_rating(request.rating)?;

    let updated = review_service::update_review(db.get_ref(), &id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ReviewResponse::from(updated)))
}

/// DELETE /api/v1/reviews/{id} - só o autor
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    params(("id" = String, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_review(
    claims: web::ReqData<Claims>,
    db: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "review")?;
    access_control::authorize_review(db.get_ref(), &id, &claims.user_id()?).await?;

    review_service::delete_review(db.get_ref(), &id).await?;
    Ok(deleted("Review deleted successfully"))
}
