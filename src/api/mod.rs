pub mod auth_extractor;
pub mod error;
pub mod handlers;
pub mod json_extractor;
pub mod post_handlers;
pub mod profile_handlers;
pub mod routes;
pub mod state;

pub use error::*;
pub use json_extractor::ValidJson;
pub use routes::*;
pub use state::*;
