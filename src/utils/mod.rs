// Utility functions
pub mod crypto;
pub mod error;
pub mod thread_pool;
