// ==================== USERS & CREDENTIALS ====================
// Cadastro, atualização e autenticação de usuários.
// Senhas só existem como hash bcrypt; o texto puro nunca é salvo nem logado.

use mongodb::bson::oid::ObjectId;

use crate::{
    database::{ProjectRepository, ReviewRepository, Store, UserRepository},
    models::{CreateUserRequest, UpdateUserRequest, User},
    services::review_service,
    utils::{
        crypto::{hash_password, verify_password},
        error::AppError,
    },
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn list_users(db: &dyn Store) -> Result<Vec<User>, AppError> {
    db.find_all_users().await
}

pub async fn get_user(db: &dyn Store, id: &ObjectId) -> Result<User, AppError> {
    db.find_user_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}

/// Cria usuário. O email é verificado logo antes do insert (não é atômico:
/// dois cadastros simultâneos com o mesmo email podem passar).
pub async fn create_user(
    db: &dyn Store,
    draft: CreateUserRequest,
    bcrypt_cost: u32,
) -> Result<User, AppError> {
    if draft.name.trim().is_empty() || draft.email.trim().is_empty() || draft.password.is_empty() {
        return Err(AppError::bad_request("Name, email and password are required"));
    }

    let email = draft.email.trim().to_string();

    if db.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::conflict("User with this email already exists"));
    }

    let password = hash_password(&draft.password, bcrypt_cost).await?;
    let now = chrono::Utc::now().timestamp();

    let mut user = User {
        id: None,
        name: draft.name,
        email,
        password,
        title: draft.title,
        bio: draft.bio,
        avatar: draft.avatar,
        skills: draft.skills,
        social: draft.social,
        rating: 0.0,
        created_at: now,
        updated_at: now,
    };

    user.id = Some(db.insert_user(&user).await?);

    log::info!("✅ User created: {}", user.email);
    Ok(user)
}

/// Atualiza os campos enviados. Senha vazia/ausente mantém o hash atual.
pub async fn update_user(
    db: &dyn Store,
    id: &ObjectId,
    patch: UpdateUserRequest,
    bcrypt_cost: u32,
) -> Result<User, AppError> {
    let mut user = get_user(db, id).await?;

    if let Some(email) = patch.email {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty"));
        }
        if email != user.email {
            if let Some(other) = db.find_user_by_email(&email).await? {
                if other.id != user.id {
                    return Err(AppError::conflict("User with this email already exists"));
                }
            }
        }
        user.email = email;
    }

    match patch.password {
        Some(password) if !password.is_empty() => {
            user.password = hash_password(&password, bcrypt_cost).await?;
        }
        _ => {}
    }

    if let Some(name) = patch.name {
        user.name = name;
    }
    if let Some(title) = patch.title {
        user.title = title;
    }
    if let Some(bio) = patch.bio {
        user.bio = bio;
    }
    if let Some(avatar) = patch.avatar {
        user.avatar = avatar;
    }
    if let Some(skills) = patch.skills {
        user.skills = skills;
    }
    if let Some(social) = patch.social {
        user.social = social;
    }

    user.updated_at = chrono::Utc::now().timestamp();

    // Não grava `rating`: um recálculo concorrente não é sobrescrito
    if !db.update_user_profile(&user).await? {
        return Err(AppError::not_found("User not found"));
    }

    log::info!("✅ User updated: {}", id.to_hex());
    get_user(db, id).await
}

/// Remove o usuário e tudo ligado a ele: projetos, reviews recebidas e
/// reviews escritas. Quem perdeu uma review tem a nota recalculada.
pub async fn delete_user(db: &dyn Store, id: &ObjectId) -> Result<(), AppError> {
    log::info!("🗑️ Deleting account for user_id: {}", id.to_hex());

    // Usuários avaliados por este usuário, antes de apagar as reviews
    let mut affected: Vec<ObjectId> = Vec::new();
    for review in db.find_reviews_by_reviewer(id).await? {
        if review.user_id != *id && !affected.contains(&review.user_id) {
            affected.push(review.user_id);
        }
    }

    if db.delete_user(id).await? == 0 {
        return Err(AppError::not_found("User not found"));
    }

    let projects = db.delete_projects_by_user(id).await?;
    let reviews = db.delete_reviews_involving(id).await?;
    log::info!(
        "✅ Deleted user {} with {} projects and {} reviews",
        id.to_hex(),
        projects,
        reviews
    );

    for user_id in affected {
        review_service::refresh_rating(db, &user_id).await;
    }

    Ok(())
}

/// Autentica email+senha. Email inexistente e senha errada dão o mesmo erro.
pub async fn authenticate(db: &dyn Store, email: &str, password: &str) -> Result<User, AppError> {
    let user = match db.find_user_by_email(email.trim()).await? {
        Some(user) => user,
        None => return Err(AppError::unauthorized(INVALID_CREDENTIALS)),
    };

    if !verify_password(password, &user.password).await? {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    Ok(user)
}

pub async fn search_by_name(db: &dyn Store, query: &str) -> Result<Vec<User>, AppError> {
    db.search_users_by_name(query).await
}

pub async fn search_by_skills(db: &dyn Store, query: &str) -> Result<Vec<User>, AppError> {
    db.search_users_by_skills(query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::InMemoryStore;
    use crate::models::{Review, Social};

    const TEST_COST: u32 = 4;

    fn draft(name: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            title: "Backend Developer".to_string(),
            bio: String::new(),
            avatar: format!("https://cdn.example.com/{}.png", name),
            skills: vec!["Rust".to_string(), "MongoDB".to_string()],
            social: Social::default(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password_and_zeroes_rating() {
        let db = InMemoryStore::new();

        let user = create_user(&db, draft("ana", "ana@example.com", "hunter2"), TEST_COST)
            .await
            .unwrap();

        assert!(user.id.is_some());
        assert_ne!(user.password, "hunter2");
        assert!(bcrypt::verify("hunter2", &user.password).unwrap());
        assert_eq!(user.rating, 0.0);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let db = InMemoryStore::new();
        create_user(&db, draft("ana", "ana@example.com", "pw-1"), TEST_COST).await.unwrap();

        let second = create_user(&db, draft("other", "ana@example.com", "pw-2"), TEST_COST).await;

        assert!(matches!(second, Err(AppError::Conflict(_))));
        let users = list_users(&db).await.unwrap();
        assert_eq!(users.iter().filter(|u| u.email == "ana@example.com").count(), 1);
    }

    #[tokio::test]
    async fn test_create_user_requires_fields() {
        let db = InMemoryStore::new();
        let result = create_user(&db, draft("", "ana@example.com", "pw"), TEST_COST).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let db = InMemoryStore::new();
        create_user(&db, draft("ana", "ana@example.com", "hunter2"), TEST_COST).await.unwrap();

        let user = authenticate(&db, "ana@example.com", "hunter2").await.unwrap();
        assert_eq!(user.name, "ana");

        let wrong_password = authenticate(&db, "ana@example.com", "nope").await.unwrap_err();
        let unknown_email = authenticate(&db, "ghost@example.com", "hunter2").await.unwrap_err();

        assert!(matches!(wrong_password, AppError::Unauthorized(_)));
        assert!(matches!(unknown_email, AppError::Unauthorized(_)));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_update_with_empty_password_keeps_hash() {
        let db = InMemoryStore::new();
        let user = create_user(&db, draft("ana", "ana@example.com", "hunter2"), TEST_COST)
            .await
            .unwrap();
        let id = user.id.unwrap();

        let patch = UpdateUserRequest {
            name: Some("Ana Maria".to_string()),
            password: Some(String::new()),
            ..Default::default()
        };
        let updated = update_user(&db, &id, patch, TEST_COST).await.unwrap();

        assert_eq!(updated.name, "Ana Maria");
        let stored = get_user(&db, &id).await.unwrap();
        assert_eq!(stored.password, user.password);
        assert_eq!(stored.email, "ana@example.com");
        assert_eq!(stored.created_at, user.created_at);
    }

    #[tokio::test]
    async fn test_update_with_new_password_rehashes() {
        let db = InMemoryStore::new();
        let user = create_user(&db, draft("ana", "ana@example.com", "hunter2"), TEST_COST)
            .await
            .unwrap();
        let id = user.id.unwrap();

        let patch = UpdateUserRequest {
            password: Some("correct horse".to_string()),
            ..Default::default()
        };
        update_user(&db, &id, patch, TEST_COST).await.unwrap();

        assert!(authenticate(&db, "ana@example.com", "correct horse").await.is_ok());
        assert!(authenticate(&db, "ana@example.com", "hunter2").await.is_err());
    }

    #[tokio::test]
    async fn test_update_cannot_take_another_users_email() {
        let db = InMemoryStore::new();
        create_user(&db, draft("ana", "ana@example.com", "pw"), TEST_COST).await.unwrap();
        let bob = create_user(&db, draft("bob", "bob@example.com", "pw"), TEST_COST).await.unwrap();

        let patch = UpdateUserRequest {
            email: Some("ana@example.com".to_string()),
            ..Default::default()
        };
        let result = update_user(&db, &bob.id.unwrap(), patch, TEST_COST).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let db = InMemoryStore::new();
        let result = update_user(&db, &ObjectId::new(), UpdateUserRequest::default(), TEST_COST).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_search_by_name_and_skills() {
        let db = InMemoryStore::new();
        create_user(&db, draft("Carla Rust", "carla@example.com", "pw"), TEST_COST).await.unwrap();
        let mut go_dev = draft("Diego", "diego@example.com", "pw");
        go_dev.skills = vec!["Go".to_string()];
        create_user(&db, go_dev, TEST_COST).await.unwrap();

        assert_eq!(search_by_name(&db, "carla").await.unwrap().len(), 1);
        assert_eq!(search_by_skills(&db, "rust").await.unwrap().len(), 1);
        assert!(search_by_name(&db, "nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_user_cascades_and_recomputes() {
        let db = InMemoryStore::new();
        let ana = create_user(&db, draft("ana", "ana@example.com", "pw"), TEST_COST).await.unwrap();
        let bob = create_user(&db, draft("bob", "bob@example.com", "pw"), TEST_COST).await.unwrap();
        let carl = create_user(&db, draft("carl", "carl@example.com", "pw"), TEST_COST).await.unwrap();
        let (ana_id, bob_id, carl_id) = (ana.id.unwrap(), bob.id.unwrap(), carl.id.unwrap());

        for (reviewer, rating) in [(ana_id, 2.0), (carl_id, 4.0)] {
            review_service::create_review(
                &db,
                Review {
                    id: None,
                    user_id: bob_id,
                    reviewer_id: reviewer,
                    reviewer_name: String::new(),
                    reviewer_avatar: String::new(),
                    rating,
                    content: String::new(),
                    created_at: 0,
                    updated_at: 0,
                },
            )
            .await
            .unwrap();
        }
        assert_eq!(get_user(&db, &bob_id).await.unwrap().rating, 3.0);

        delete_user(&db, &ana_id).await.unwrap();

        assert!(matches!(get_user(&db, &ana_id).await, Err(AppError::NotFound(_))));
        assert_eq!(db.find_reviews_by_user(&bob_id).await.unwrap().len(), 1);
        assert_eq!(get_user(&db, &bob_id).await.unwrap().rating, 4.0);

        assert!(matches!(delete_user(&db, &ana_id).await, Err(AppError::NotFound(_))));
    }

    fn review_of(user_id: ObjectId, reviewer_id: ObjectId, rating: f64) -> Review {
        Review {
            id: None,
            user_id,
            reviewer_id,
            reviewer_name: String::new(),
            reviewer_avatar: String::new(),
            rating,
            content: String::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[tokio::test]
    async fn test_profile_update_does_not_clobber_concurrent_rating() {
        let db = InMemoryStore::new();
        let ana = create_user(&db, draft("ana", "ana@example.com", "pw"), TEST_COST).await.unwrap();
        let bob = create_user(&db, draft("bob", "bob@example.com", "pw"), TEST_COST).await.unwrap();
        let (ana_id, bob_id) = (ana.id.unwrap(), bob.id.unwrap());

        // O hash da senha nova cede a vez enquanto a review recalcula a nota
        let patch = UpdateUserRequest {
            password: Some("new-password".to_string()),
            bio: Some("Rustacean".to_string()),
            ..Default::default()
        };
        let (updated, created) = tokio::join!(
            update_user(&db, &bob_id, patch, TEST_COST),
            review_service::create_review(&db, review_of(bob_id, ana_id, 5.0)),
        );
        updated.unwrap();
        created.unwrap();

        let stored = get_user(&db, &bob_id).await.unwrap();
        assert_eq!(stored.rating, 5.0);
        assert_eq!(stored.bio, "Rustacean");
        assert!(verify_password("new-password", &stored.password).await.unwrap());
    }

    #[tokio::test]
    async fn test_rating_write_keeps_profile_and_password() {
        let db = InMemoryStore::new();
        let bob = create_user(&db, draft("bob", "bob@example.com", "hunter2"), TEST_COST)
            .await
            .unwrap();
        let bob_id = bob.id.unwrap();

        assert!(db.set_user_rating(&bob_id, 4.5, 42).await.unwrap());

        let stored = get_user(&db, &bob_id).await.unwrap();
        assert_eq!(stored.rating, 4.5);
        assert_eq!(stored.updated_at, 42);
        assert_eq!(stored.password, bob.password);
        assert_eq!(stored.title, "Backend Developer");
        assert!(!db.set_user_rating(&ObjectId::new(), 1.0, 42).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_returns_stored_rating() {
        let db = InMemoryStore::new();
        let ana = create_user(&db, draft("ana", "ana@example.com", "pw"), TEST_COST).await.unwrap();
        let bob = create_user(&db, draft("bob", "bob@example.com", "pw"), TEST_COST).await.unwrap();
        let (ana_id, bob_id) = (ana.id.unwrap(), bob.id.unwrap());
        review_service::create_review(&db, review_of(bob_id, ana_id, 3.0)).await.unwrap();

        let patch = UpdateUserRequest { title: Some("Staff Engineer".to_string()), ..Default::default() };
        let updated = update_user(&db, &bob_id, patch, TEST_COST).await.unwrap();

        assert_eq!(updated.rating, 3.0);
        assert_eq!(updated.title, "Staff Engineer");
    }
}
