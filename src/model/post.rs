use crate::model::{generate_id, now, Id, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Id,
    pub user: Id,
    pub text: String,
    pub name: String,
    pub avatar: String,
    /// Newest first.
    #[serde(default)]
    pub likes: Vec<Like>,
    /// Newest first.
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: Id,
    pub user: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Id,
    pub user: Id,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

/// Body for creating or editing a post, and for adding a comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextBody {
    pub text: Option<String>,
}

impl Post {
    /// New post carrying a snapshot of the author's name and avatar.
    pub fn new(author: &User, text: String) -> Self {
        Self {
            id: generate_id(),
            user: author.id.clone(),
            text,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            likes: Vec::new(),
            comments: Vec::new(),
            date: now(),
            version: 0,
        }
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|like| like.user == user_id)
    }
}

impl Like {
    pub fn new(user_id: Id) -> Self {
        Self {
            id: generate_id(),
            user: user_id,
        }
    }
}

impl Comment {
    pub fn new(author: &User, text: String) -> Self {
        Self {
            id: generate_id(),
            user: author.id.clone(),
            text,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            date: now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_snapshots_author() {
        let author = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
            "//www.gravatar.com/avatar/x".to_string(),
        );
        let post = Post::new(&author, "hello".to_string());
        assert_eq!(post.user, author.id);
        assert_eq!(post.name, "Ada");
        assert_eq!(post.avatar, author.avatar);
        assert!(post.likes.is_empty());
        assert!(!post.is_liked_by(&author.id));
    }
}
