//! Combined statistics for rendering

use super::list_helper::{
    favorite_blog, most_blogs, most_likes, total_likes, AuthorBlogs, AuthorLikes,
};
use crate::blog::BlogRecord;
use serde::Serialize;

/// Every list statistic for one set of stored blogs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogSummary {
    /// Number of blogs summarized
    pub count: usize,
    pub total_likes: u64,
    /// Most liked blog, absent for an empty list
    pub favorite: Option<BlogRecord>,
    pub most_blogs: AuthorBlogs,
    pub most_likes: AuthorLikes,
}

/// Summarize stored blogs
pub fn summarize(blogs: &[BlogRecord]) -> BlogSummary {
    BlogSummary {
        count: blogs.len(),
        total_likes: total_likes(blogs),
        favorite: favorite_blog(blogs).ok().cloned(),
        most_blogs: most_blogs(blogs),
        most_likes: most_likes(blogs),
    }
}
