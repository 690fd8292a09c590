//! Blog list statistics
//!
//! Pure reductions over a borrowed sequence of blog-like values. Nothing here
//! performs I/O or mutates its input, so every function may be called from
//! any number of threads at once.

mod list_helper;
mod summary;

pub use list_helper::{
    count_or_default, favorite_blog, most_blogs, most_likes, total_likes, AggregateError,
    AuthorBlogs, AuthorLikes, BlogLike,
};
pub use summary::{summarize, BlogSummary};
