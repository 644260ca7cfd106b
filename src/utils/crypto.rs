use crate::utils::{error::AppError, thread_pool::spawn_hash_blocking};

/// Gera hash bcrypt da senha no pool de hashing
pub async fn hash_password(plaintext: &str, cost: u32) -> Result<String, AppError> {
    let plaintext = plaintext.to_string();

    spawn_hash_blocking(move || bcrypt::hash(plaintext, cost))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// Compara senha com o hash armazenado; hash malformado conta como falha
pub async fn verify_password(plaintext: &str, hash: &str) -> Result<bool, AppError> {
    let plaintext = plaintext.to_string();
    let hash = hash.to_string();

    let result = spawn_hash_blocking(move || bcrypt::verify(plaintext, &hash))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?;

    match result {
        Ok(valid) => Ok(valid),
        Err(e) => {
            log::warn!("⚠️  Stored password hash could not be verified: {}", e);
            Ok(false)
        }
    }
}
