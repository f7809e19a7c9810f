use crate::logic::error::{OpError, OpResult};
use crate::logic::validate;
use crate::model::{AuthUser, Comment, Id, Like, Post, TextBody, User};
use crate::store::traits::Store;

const NOT_AUTHORIZED: &str = "User not authorized";

/// Post reads plus the like/comment mutations on a post document
pub struct PostOperations;

impl PostOperations {
    pub async fn create<S: Store>(store: &S, auth: &AuthUser, body: &TextBody) -> OpResult<Post> {
        let text = validate::text(body)?;
        let author = Self::load_user(store, auth).await?;
        Ok(store.insert_post(Post::new(&author, text)).await?)
    }

    /// All posts, newest first
    pub async fn list<S: Store>(store: &S) -> OpResult<Vec<Post>> {
        Ok(store.list_posts().await?)
    }

    pub async fn get<S: Store>(store: &S, post_id: &Id) -> OpResult<Post> {
        store
            .get_post(post_id)
            .await?
            .ok_or_else(|| OpError::NotFound("Post not found".to_string()))
    }

    /// Replace the text of a post the caller owns
    pub async fn update<S: Store>(
        store: &S,
        auth: &AuthUser,
        post_id: &Id,
        body: &TextBody,
    ) -> OpResult<Post> {
        let text = validate::text(body)?;
        let mut post = Self::get(store, post_id).await?;
        if !auth.owns(&post.user) {
            return Err(OpError::Unauthorized(NOT_AUTHORIZED.to_string()));
        }
        post.text = text;
        Ok(store.save_post(post).await?)
    }

    pub async fn delete<S: Store>(store: &S, auth: &AuthUser, post_id: &Id) -> OpResult<()> {
        let post = Self::get(store, post_id).await?;
        if !auth.owns(&post.user) {
            return Err(OpError::Unauthorized(NOT_AUTHORIZED.to_string()));
        }
        if !store.delete_post(post_id).await? {
            return Err(OpError::NotFound("Post not found".to_string()));
        }
        Ok(())
    }

    /// Prepend a like by the caller; at most one like per user
    pub async fn like<S: Store>(store: &S, auth: &AuthUser, post_id: &Id) -> OpResult<Vec<Like>> {
        let mut post = Self::get(store, post_id).await?;
        if post.is_liked_by(&auth.user_id) {
            return Err(OpError::Conflict("Post already liked".to_string()));
        }
        post.likes.insert(0, Like::new(auth.user_id.clone()));
        Ok(store.save_post(post).await?.likes)
    }

    pub async fn unlike<S: Store>(
        store: &S,
        auth: &AuthUser,
        post_id: &Id,
    ) -> OpResult<Vec<Like>> {
        let mut post = Self::get(store, post_id).await?;
        let index = post
            .likes
            .iter()
            .position(|like| like.user == auth.user_id)
            .ok_or_else(|| OpError::Conflict("Post has not yet been liked".to_string()))?;
        post.likes.remove(index);
        Ok(store.save_post(post).await?.likes)
    }

    /// Prepend a comment carrying the caller's name and avatar
    pub async fn add_comment<S: Store>(
        store: &S,
        auth: &AuthUser,
        post_id: &Id,
        body: &TextBody,
    ) -> OpResult<Vec<Comment>> {
        let text = validate::text(body)?;
        let author = Self::load_user(store, auth).await?;
        let mut post = Self::get(store, post_id).await?;
        post.comments.insert(0, Comment::new(&author, text));
        Ok(store.save_post(post).await?.comments)
    }

    /// Remove exactly the identified comment, which the caller must own
    pub async fn remove_comment<S: Store>(
        store: &S,
        auth: &AuthUser,
        post_id: &Id,
        comment_id: &str,
    ) -> OpResult<Vec<Comment>> {
        let mut post = Self::get(store, post_id).await?;
        let index = post
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| OpError::NotFound("Comment does not exist".to_string()))?;
        if !auth.owns(&post.comments[index].user) {
            return Err(OpError::Unauthorized(NOT_AUTHORIZED.to_string()));
        }
        post.comments.remove(index);
        Ok(store.save_post(post).await?.comments)
    }

    async fn load_user<S: Store>(store: &S, auth: &AuthUser) -> OpResult<User> {
        store
            .get_user(&auth.user_id)
            .await?
            .ok_or_else(|| OpError::NotFound("User not found".to_string()))
    }
}
