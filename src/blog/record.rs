//! Blog record structures
//!
//! `BlogRecord` is what the store hands out and the API renders. `NewBlog`
//! is the raw request body; it only becomes storable after `validate`.

use super::BlogId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected blog input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent or blank
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Likes must be zero or more
    #[error("likes must not be negative, got {0}")]
    NegativeLikes(i64),
}

/// A stored blog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRecord {
    /// Identifier assigned by the store
    pub id: BlogId,

    pub title: String,

    /// Author, when one was given
    pub author: Option<String>,

    pub url: String,

    #[serde(default)]
    pub likes: u64,
}

impl BlogRecord {
    /// Build a stored record from validated input
    pub fn from_valid(id: BlogId, blog: ValidBlog) -> Self {
        Self {
            id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        }
    }
}

/// Blog creation request body
///
/// Every field is optional at this stage so that missing fields surface as
/// `ValidationError`s instead of deserialization failures. Unknown fields
/// (`id`, `__v`, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewBlog {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl NewBlog {
    /// Convenience constructor for the required fields
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the like count
    pub fn with_likes(mut self, likes: i64) -> Self {
        self.likes = Some(likes);
        self
    }

    /// Check required fields and normalize the input
    pub fn validate(self) -> Result<ValidBlog, ValidationError> {
        let title = required(self.title, "title")?;
        let url = required(self.url, "url")?;
        let author = self
            .author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let likes = match self.likes {
            None => 0,
            Some(n) if n < 0 => return Err(ValidationError::NegativeLikes(n)),
            Some(n) => n as u64,
        };

        Ok(ValidBlog {
            title,
            author,
            url,
            likes,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

/// Blog input that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
}

/// Body of a likes update request
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LikesUpdate {
    pub likes: i64,
}

impl LikesUpdate {
    /// Reject negative counts
    pub fn validate(self) -> Result<u64, ValidationError> {
        if self.likes < 0 {
            Err(ValidationError::NegativeLikes(self.likes))
        } else {
            Ok(self.likes as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_complete_blog() {
        let blog = NewBlog::new("Type wars", "http://blog.cleancoder.com/uncle-bob/2016/05/01/TypeWars.html")
            .with_author("Robert C. Martin")
            .with_likes(2)
            .validate()
            .unwrap();

        assert_eq!(blog.title, "Type wars");
        assert_eq!(blog.author.as_deref(), Some("Robert C. Martin"));
        assert_eq!(blog.likes, 2);
    }

    #[test]
    fn test_likes_default_to_zero() {
        let blog = NewBlog::new("Blog 1", "http://google.ca").validate().unwrap();
        assert_eq!(blog.likes, 0);
        assert_eq!(blog.author, None);
    }

    #[test]
    fn test_missing_title_rejected() {
        let blog = NewBlog {
            url: Some("http://google.ca".to_string()),
            ..Default::default()
        };
        assert_eq!(blog.validate(), Err(ValidationError::MissingField("title")));
    }

    #[test]
    fn test_blank_url_rejected() {
        let blog = NewBlog::new("Blog No URL", "   ");
        assert_eq!(blog.validate(), Err(ValidationError::MissingField("url")));
    }

    #[test]
    fn test_negative_likes_rejected() {
        let blog = NewBlog::new("Blog", "http://x").with_likes(-1);
        assert_eq!(blog.validate(), Err(ValidationError::NegativeLikes(-1)));
    }

    #[test]
    fn test_blank_author_becomes_none() {
        let blog = NewBlog::new(" Blog ", "http://x")
            .with_author("  ")
            .validate()
            .unwrap();
        assert_eq!(blog.title, "Blog");
        assert_eq!(blog.author, None);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{
            "id": "6a422b3a1b54a676234d17f9",
            "title": "Type wars",
            "author": "Robert C. Martin",
            "url": "http://blog.cleancoder.com",
            "likes": 2,
            "__v": 0
        }"#;
        let blog: NewBlog = serde_json::from_str(json).unwrap();
        assert_eq!(blog.likes, Some(2));
        assert!(blog.validate().is_ok());
    }

    #[test]
    fn test_record_serializes_id_field() {
        let record = BlogRecord::from_valid(
            BlogId::new("5a422a851b54a676234d17f7"),
            NewBlog::new("React patterns", "https://reactpatterns.com/")
                .with_author("Michael Chan")
                .with_likes(7)
                .validate()
                .unwrap(),
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "5a422a851b54a676234d17f7");
        assert!(value.get("_id").is_none());
        assert_eq!(value["likes"], 7);
    }

    #[test]
    fn test_likes_update_validation() {
        assert_eq!(LikesUpdate { likes: 4 }.validate(), Ok(4));
        assert_eq!(
            LikesUpdate { likes: -3 }.validate(),
            Err(ValidationError::NegativeLikes(-3))
        );
    }
}
