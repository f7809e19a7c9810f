pub mod account_ops;
pub mod error;
pub mod github;
pub mod post_ops;
pub mod profile_ops;
pub mod validate;

pub use account_ops::AccountOperations;
pub use error::*;
pub use github::GitHubClient;
pub use post_ops::PostOperations;
pub use profile_ops::ProfileOperations;
