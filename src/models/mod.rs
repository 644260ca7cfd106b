pub mod user;
pub mod project;
pub mod review;
pub mod search;

pub use user::*;
pub use project::*;
pub use review::*;
pub use search::*;
