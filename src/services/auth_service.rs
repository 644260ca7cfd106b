use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    database::Store,
    models::{CreateUserRequest, User, UserResponse},
    services::user_service,
    utils::error::AppError,
};

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id (hex)
    pub email: String,
    pub iat: usize, // issued at
    pub nbf: usize, // not before
    pub exp: usize, // expiration
    pub jti: String, // JWT ID
    pub aud: String, // audience
    pub iss: String, // issuer
}

impl Claims {
    /// `sub` como ObjectId; token com `sub` inválido é tratado como não autenticado
    pub fn user_id(&self) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(&self.sub).map_err(|_| AppError::unauthorized("Invalid token subject"))
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponse {
    pub success: bool,
    pub valid: bool,
    pub user_id: String,
    pub email: String,
    pub exp: usize,
}

// Generate JWT token
pub fn generate_jwt(user: &User, config: &AppConfig) -> Result<String, AppError> {
    let user_id = user
        .id
        .ok_or_else(|| AppError::internal("Cannot issue a token for an unsaved user"))?;

    let now = Utc::now();
    let iat = now.timestamp() as usize;
    let exp = (now + Duration::hours(config.jwt_ttl_hours)).timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_hex(),
        email: user.email.clone(),
        iat,
        nbf: iat,
        exp,
        jti: Uuid::new_v4().to_string(),
        aud: config.jwt_audience.clone(),
        iss: config.jwt_issuer.clone(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
}

// Verify JWT token
pub fn verify_token(token: &str, config: &AppConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_nbf = true;
    validation.set_audience(&[config.jwt_audience.as_str()]);

    let mut issuers = HashSet::new();
    issuers.insert(config.jwt_issuer.clone());
    validation.iss = Some(issuers);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::unauthorized(format!("Invalid token: {}", e)))
}

// User login
pub async fn login(
    db: &dyn Store,
    config: &AppConfig,
    request: &LoginRequest,
) -> Result<AuthResponse, AppError> {
    let user = user_service::authenticate(db, &request.email, &request.password).await?;
    let token = generate_jwt(&user, config)?;

    Ok(AuthResponse {
        success: true,
        token,
        user: UserResponse::from(user),
    })
}

// User registration
pub async fn register(
    db: &dyn Store,
    config: &AppConfig,
    request: CreateUserRequest,
) -> Result<AuthResponse, AppError> {
    let user = user_service::create_user(db, request, config.bcrypt_cost).await?;
    let token = generate_jwt(&user, config)?;

    log::info!("✅ User registered successfully: {}", user.email);

    Ok(AuthResponse {
        success: true,
        token,
        user: UserResponse::from(user),
    })
}

// Get current user
pub async fn get_current_user(db: &dyn Store, claims: &Claims) -> Result<User, AppError> {
    let user_id = claims.user_id()?;
    user_service::get_user(db, &user_id).await
}
