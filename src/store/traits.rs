use crate::model::{Id, Post, Profile, User};
use anyhow::Result;

#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: &Id) -> Result<Option<User>>;
    /// Lookup by the normalized (trimmed, lower-cased) e-mail.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Fails with [`StoreError::Duplicate`](crate::store::StoreError) when the e-mail is taken.
    async fn insert_user(&self, user: User) -> Result<()>;
}

#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile_by_user(&self, user_id: &Id) -> Result<Option<Profile>>;
    async fn list_profiles(&self) -> Result<Vec<Profile>>;
    /// Fails with a duplicate error when the user already owns a profile.
    async fn insert_profile(&self, profile: Profile) -> Result<Profile>;
    /// Writes the whole document if the stored version still matches
    /// `profile.version`, returning it with the bumped version.
    async fn save_profile(&self, profile: Profile) -> Result<Profile>;
}

#[async_trait::async_trait]
pub trait PostStore: Send + Sync {
    async fn get_post(&self, id: &Id) -> Result<Option<Post>>;
    /// All posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>>;
    async fn insert_post(&self, post: Post) -> Result<Post>;
    /// Version-checked write, same contract as [`ProfileStore::save_profile`].
    async fn save_post(&self, post: Post) -> Result<Post>;
    async fn delete_post(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait Store: UserStore + ProfileStore + PostStore + Send + Sync {
    /// Remove a user together with their profile and every post they wrote,
    /// all or nothing. Returns the number of posts removed, or `None` when
    /// the user does not exist (in which case nothing is touched).
    async fn delete_account(&self, user_id: &Id) -> Result<Option<u64>>;
}
