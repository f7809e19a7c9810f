//! Credentials and bearer tokens.
//!
//! - Argon2 password hashing and verification
//! - HS256 JWT issuance and validation
//! - Gravatar avatar URLs derived from the account e-mail

mod avatar;
mod error;
mod password;
mod token;

pub use avatar::*;
pub use error::*;
pub use password::*;
pub use token::*;

/// Default token lifetime in seconds (100 hours).
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 360_000;

/// Issuer written into and required from every token.
pub const TOKEN_ISSUER: &str = "devconnector";
