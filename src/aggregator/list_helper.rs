//! Aggregation helpers over blog lists

use crate::blog::{BlogRecord, ValidBlog};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Aggregation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The operation needs at least one blog
    #[error("blog list is empty")]
    EmptyInput,
}

/// Anything that carries a like count and an optional author
pub trait BlogLike {
    fn likes(&self) -> u64;
    fn author(&self) -> Option<&str>;
}

impl BlogLike for BlogRecord {
    fn likes(&self) -> u64 {
        self.likes
    }

    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

impl BlogLike for ValidBlog {
    fn likes(&self) -> u64 {
        self.likes
    }

    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

impl<T: BlogLike + ?Sized> BlogLike for &T {
    fn likes(&self) -> u64 {
        (**self).likes()
    }

    fn author(&self) -> Option<&str> {
        (**self).author()
    }
}

/// Author with the most blogs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogs {
    pub author: Option<String>,
    pub blogs: u64,
}

/// Author with the most likes across their blogs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: Option<String>,
    pub likes: u64,
}

/// Returns 1 for an empty list and 0 otherwise
pub fn count_or_default<B: BlogLike>(blogs: &[B]) -> u64 {
    if blogs.is_empty() {
        1
    } else {
        0
    }
}

/// Sum of likes over all blogs
///
/// The sum saturates at `u64::MAX`.
pub fn total_likes<B: BlogLike>(blogs: &[B]) -> u64 {
    blogs
        .iter()
        .fold(0u64, |total, blog| total.saturating_add(blog.likes()))
}

/// The blog with the most likes
///
/// Ties go to the earliest blog in input order.
pub fn favorite_blog<B: BlogLike>(blogs: &[B]) -> Result<&B, AggregateError> {
    let (first, rest) = blogs.split_first().ok_or(AggregateError::EmptyInput)?;
    Ok(rest.iter().fold(first, |best, blog| {
        if blog.likes() > best.likes() {
            blog
        } else {
            best
        }
    }))
}

/// The author who wrote the most blogs, with their blog count
///
/// Blogs without an author are counted under `None`. Among equally prolific
/// authors the one that appears first in the input wins.
pub fn most_blogs<B: BlogLike>(blogs: &[B]) -> AuthorBlogs {
    let per_author = group_by_author(blogs, |_| 1);
    match max_entry(per_author) {
        Some((author, blogs)) => AuthorBlogs {
            author: author.map(str::to_string),
            blogs,
        },
        None => AuthorBlogs {
            author: None,
            blogs: 0,
        },
    }
}

/// The author whose blogs collected the most likes, with that total
///
/// Same grouping and tie rules as [`most_blogs`]. Per-author sums saturate
/// at `u64::MAX`.
pub fn most_likes<B: BlogLike>(blogs: &[B]) -> AuthorLikes {
    let per_author = group_by_author(blogs, B::likes);
    match max_entry(per_author) {
        Some((author, likes)) => AuthorLikes {
            author: author.map(str::to_string),
            likes,
        },
        None => AuthorLikes {
            author: None,
            likes: 0,
        },
    }
}

/// Per-author totals in order of each author's first appearance
fn group_by_author<B, F>(blogs: &[B], value_fn: F) -> Vec<(Option<&str>, u64)>
where
    B: BlogLike,
    F: Fn(&B) -> u64,
{
    let mut totals: Vec<(Option<&str>, u64)> = Vec::new();
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();
    for blog in blogs {
        let author = blog.author();
        let slot = *index.entry(author).or_insert_with(|| {
            totals.push((author, 0));
            totals.len() - 1
        });
        totals[slot].1 = totals[slot].1.saturating_add(value_fn(blog));
    }
    totals
}

fn max_entry(totals: Vec<(Option<&str>, u64)>) -> Option<(Option<&str>, u64)> {
    totals
        .into_iter()
        .fold(None, |best, entry| match best {
            Some(current) if entry.1 <= current.1 => Some(current),
            _ => Some(entry),
        })
}
