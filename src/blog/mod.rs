//! Blog data model
//!
//! - `BlogId`: opaque identifier assigned by the store
//! - `BlogRecord`: a stored blog entry
//! - `NewBlog` / `ValidBlog`: request input before and after validation

mod ids;
mod record;

pub use ids::BlogId;
pub use record::{BlogRecord, LikesUpdate, NewBlog, ValidBlog, ValidationError};
