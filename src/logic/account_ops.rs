use log::info;

use crate::auth::{gravatar_url, hash_password, verify_password, TokenManager};
use crate::logic::error::{OpError, OpResult};
use crate::logic::validate;
use crate::model::{Account, AuthUser, Credentials, NewUser, TokenResponse, User};
use crate::store::traits::Store;
use crate::store::StoreError;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const USER_EXISTS: &str = "User already exists";

/// Registration, login and account lifecycle
pub struct AccountOperations;

impl AccountOperations {
    /// Create an account and return a token for it
    pub async fn register<S: Store>(
        store: &S,
        tokens: &TokenManager,
        input: &NewUser,
    ) -> OpResult<TokenResponse> {
        let registration = validate::registration(input)?;

        if store.find_user_by_email(&registration.email).await?.is_some() {
            return Err(OpError::AccountRejected(USER_EXISTS.to_string()));
        }

        let password_hash = hash_password(&registration.password)?;
        let avatar = gravatar_url(&registration.email);
        let user = User::new(registration.name, registration.email, password_hash, avatar);

        // The unique index still guards against a racing registration.
        if let Err(e) = store.insert_user(user.clone()).await {
            if let Some(StoreError::Duplicate { .. }) = e.downcast_ref::<StoreError>() {
                return Err(OpError::AccountRejected(USER_EXISTS.to_string()));
            }
            return Err(e.into());
        }

        info!("Registered user {}", user.id);
        let token = tokens.issue(&user.id)?;
        Ok(TokenResponse { token })
    }

    /// Exchange e-mail and password for a token
    pub async fn login<S: Store>(
        store: &S,
        tokens: &TokenManager,
        input: &Credentials,
    ) -> OpResult<TokenResponse> {
        let (email, password) = validate::login(input)?;

        let user = store
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| OpError::AccountRejected(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&password, &user.password) {
            return Err(OpError::AccountRejected(INVALID_CREDENTIALS.to_string()));
        }

        let token = tokens.issue(&user.id)?;
        Ok(TokenResponse { token })
    }

    pub async fn current<S: Store>(store: &S, auth: &AuthUser) -> OpResult<Account> {
        store
            .get_user(&auth.user_id)
            .await?
            .map(|user| user.to_account())
            .ok_or_else(|| OpError::NotFound("User not found".to_string()))
    }

    /// Remove the user with their profile and posts in a single store step
    pub async fn delete_account<S: Store>(store: &S, auth: &AuthUser) -> OpResult<()> {
        let posts = store
            .delete_account(&auth.user_id)
            .await?
            .ok_or_else(|| OpError::NotFound("User not found".to_string()))?;
        info!("Deleted user {} and {} post(s)", auth.user_id, posts);
        Ok(())
    }
}
