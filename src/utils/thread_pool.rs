//! Pool dedicado para hashing de senhas (bcrypt)
//!
//! bcrypt é CPU-bound: no pool principal ele bloquearia os workers
//! do actix por centenas de milissegundos a cada login.

use lazy_static::lazy_static;
use std::sync::Arc;
use tokio::runtime::Runtime;

lazy_static! {
    pub static ref HASH_POOL: Arc<Runtime> = Arc::new(
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .max_blocking_threads(8)
            .thread_name("hash-worker")
            .enable_all()
            .build()
            .expect("Failed to create hashing thread pool")
    );
}

/// Executa uma operação blocking no pool de hashing
pub async fn spawn_hash_blocking<F, R>(f: F) -> Result<R, tokio::task::JoinError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    HASH_POOL.spawn_blocking(f).await
}
