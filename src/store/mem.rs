use anyhow::Result;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::model::{normalize_email, Id, Post, Profile, User};
use crate::store::error::StoreError;
use crate::store::traits::{PostStore, ProfileStore, Store, UserStore};

/// In-process store used by tests and by `database.backend = "memory"`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Id, User>>,
    profiles: RwLock<HashMap<Id, Profile>>,
    posts: RwLock<HashMap<Id, Post>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, id: &Id) -> Result<Option<User>> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = normalize_email(email);
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert_user(&self, user: User) -> Result<()> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::duplicate("User", user.email).into());
        }
        users.insert(user.id.clone(), user);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile_by_user(&self, user_id: &Id) -> Result<Option<Profile>> {
        Ok(self
            .profiles
            .read()
            .values()
            .find(|p| &p.user == user_id)
            .cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let mut profiles: Vec<Profile> = self.profiles.read().values().cloned().collect();
        profiles.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(profiles)
    }

    async fn insert_profile(&self, mut profile: Profile) -> Result<Profile> {
        let mut profiles = self.profiles.write();
        if profiles.values().any(|p| p.user == profile.user) {
            return Err(StoreError::duplicate("Profile", profile.user).into());
        }
        profile.version = 1;
        profiles.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    async fn save_profile(&self, mut profile: Profile) -> Result<Profile> {
        let mut profiles = self.profiles.write();
        match profiles.get(&profile.id) {
            Some(stored) if stored.version == profile.version => {}
            _ => {
                return Err(
                    StoreError::version_conflict("Profile", profile.id, profile.version).into(),
                )
            }
        }
        profile.version += 1;
        profiles.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }
}

#[async_trait::async_trait]
impl PostStore for MemoryStore {
    async fn get_post(&self, id: &Id) -> Result<Option<Post>> {
        Ok(self.posts.read().get(id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self.posts.read().values().cloned().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn insert_post(&self, mut post: Post) -> Result<Post> {
        let mut posts = self.posts.write();
        if posts.contains_key(&post.id) {
            return Err(StoreError::duplicate("Post", post.id).into());
        }
        post.version = 1;
        posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn save_post(&self, mut post: Post) -> Result<Post> {
        let mut posts = self.posts.write();
        match posts.get(&post.id) {
            Some(stored) if stored.version == post.version => {}
            _ => return Err(StoreError::version_conflict("Post", post.id, post.version).into()),
        }
        post.version += 1;
        posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn delete_post(&self, id: &Id) -> Result<bool> {
        Ok(self.posts.write().remove(id).is_some())
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn delete_account(&self, user_id: &Id) -> Result<Option<u64>> {
        // Lock order: users, profiles, posts.
        let mut users = self.users.write();
        let mut profiles = self.profiles.write();
        let mut posts = self.posts.write();

        if users.remove(user_id).is_none() {
            return Ok(None);
        }
        profiles.retain(|_, p| &p.user != user_id);
        let before = posts.len();
        posts.retain(|_, p| &p.user != user_id);
        Ok(Some((before - posts.len()) as u64))
    }
}
