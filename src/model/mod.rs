pub mod common;
pub mod post;
pub mod profile;
pub mod user;
pub mod user_context;

pub use common::*;
pub use post::*;
pub use profile::*;
pub use user::*;
pub use user_context::*;
