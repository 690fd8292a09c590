//! SQLite blog store

use crate::blog::{BlogId, BlogRecord, ValidBlog};
use crate::{BlogListError, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to SQLite database file
    pub path: PathBuf,

    /// Enable WAL mode for better concurrency
    pub wal_mode: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        // Always use ~/.config for consistency across platforms (macOS, Linux)
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("bloglist");
        path.push("blogs.db");

        Self {
            path,
            wal_mode: true,
        }
    }
}

/// SQLite store for blog records
pub struct BlogStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl BlogStore {
    /// Open or create a blog database
    pub fn new(config: StoreConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %config.path.display(), "Opening blog database");

        let conn = Connection::open(&config.path)?;

        if config.wal_mode {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }

        let store = Self {
            conn,
            path: Some(config.path),
        };
        store.init_schema()?;

        Ok(store)
    }

    /// Open a throwaway database that lives only in memory
    pub fn in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS blogs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT,
                url TEXT NOT NULL,
                likes INTEGER NOT NULL DEFAULT 0 CHECK (likes >= 0),
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_blogs_author ON blogs(author);
            "#,
        )?;

        Ok(())
    }

    /// Store a validated blog under a freshly generated id
    pub fn insert(&self, blog: &ValidBlog) -> Result<BlogRecord> {
        let id = BlogId::generate();
        insert_tx(&self.conn, &id, blog)?;

        tracing::debug!(id = %id, title = %blog.title, "Blog stored");
        Ok(BlogRecord::from_valid(id, blog.clone()))
    }

    /// Store several blogs in one transaction
    pub fn insert_many(&self, blogs: &[ValidBlog]) -> Result<Vec<BlogRecord>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut records = Vec::with_capacity(blogs.len());

        for blog in blogs {
            let id = BlogId::generate();
            insert_tx(&tx, &id, blog)?;
            records.push(BlogRecord::from_valid(id, blog.clone()));
        }

        tx.commit()?;

        tracing::info!(count = records.len(), "Blogs stored");
        Ok(records)
    }

    /// All blogs in insertion order
    pub fn list(&self) -> Result<Vec<BlogRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, author, url, likes FROM blogs ORDER BY rowid")?;

        let blogs = stmt
            .query_map([], row_to_blog)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(blogs)
    }

    /// Look up a blog by id
    pub fn get(&self, id: &BlogId) -> Result<Option<BlogRecord>> {
        let blog = self
            .conn
            .query_row(
                "SELECT id, title, author, url, likes FROM blogs WHERE id = ?",
                [id.as_str()],
                row_to_blog,
            )
            .optional()?;

        Ok(blog)
    }

    /// Delete a blog
    ///
    /// Fails with `NotFound` when no blog has this id.
    pub fn delete(&self, id: &BlogId) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM blogs WHERE id = ?", [id.as_str()])?;

        if removed == 0 {
            return Err(BlogListError::NotFound(id.to_string()));
        }

        tracing::debug!(id = %id, "Blog deleted");
        Ok(())
    }

    /// Replace the like count of a blog and return the updated record
    ///
    /// Fails with `NotFound` when no blog has this id.
    pub fn update_likes(&self, id: &BlogId, likes: u64) -> Result<BlogRecord> {
        let likes = i64::try_from(likes).map_err(|_| {
            BlogListError::Other(format!("likes value {} does not fit in the database", likes))
        })?;
        let updated = self.conn.execute(
            "UPDATE blogs SET likes = ? WHERE id = ?",
            params![likes, id.as_str()],
        )?;

        if updated == 0 {
            return Err(BlogListError::NotFound(id.to_string()));
        }
        self.get(id)?
            .ok_or_else(|| BlogListError::NotFound(id.to_string()))
    }

    /// Number of stored blogs
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM blogs", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Remove every blog
    pub fn clear(&self) -> Result<()> {
        tracing::info!("Clearing blog database");
        self.conn.execute("DELETE FROM blogs", [])?;
        Ok(())
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn insert_tx(conn: &Connection, id: &BlogId, blog: &ValidBlog) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO blogs (id, title, author, url, likes, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
        params![
            id.as_str(),
            &blog.title,
            blog.author.as_deref(),
            &blog.url,
            blog.likes as i64,
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn row_to_blog(row: &Row<'_>) -> rusqlite::Result<BlogRecord> {
    let id: String = row.get(0)?;
    let likes: i64 = row.get(4)?;

    Ok(BlogRecord {
        id: BlogId::new(id),
        title: row.get(1)?,
        author: row.get(2)?,
        url: row.get(3)?,
        likes: likes.max(0) as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::NewBlog;
    use tempfile::TempDir;

    fn valid(title: &str, author: &str, likes: i64) -> ValidBlog {
        NewBlog::new(title, "http://example.com")
            .with_author(author)
            .with_likes(likes)
            .validate()
            .unwrap()
    }

    #[test]
    fn test_store_creation() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig {
            path: temp_dir.path().join("nested").join("blogs.db"),
            ..Default::default()
        };

        let store = BlogStore::new(config).unwrap();
        assert!(store.path().unwrap().exists());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_default_path() {
        let config = StoreConfig::default();
        assert!(config.path.ends_with("bloglist/blogs.db"));
        assert!(config.wal_mode);
    }

    #[test]
    fn test_insert_and_list_preserves_order() {
        let store = BlogStore::in_memory().unwrap();

        store.insert(&valid("First", "A", 1)).unwrap();
        store.insert(&valid("Second", "B", 2)).unwrap();
        store.insert(&valid("Third", "A", 3)).unwrap();

        let titles: Vec<String> = store.list().unwrap().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_insert_assigns_id() {
        let store = BlogStore::in_memory().unwrap();
        let record = store.insert(&valid("Blog", "A", 0)).unwrap();

        assert_eq!(record.id.as_str().len(), 24);
        assert_eq!(store.get(&record.id).unwrap(), Some(record));
    }

    #[test]
    fn test_author_is_optional() {
        let store = BlogStore::in_memory().unwrap();
        let blog = NewBlog::new("Anonymous", "http://example.com").validate().unwrap();
        let record = store.insert(&blog).unwrap();

        let loaded = store.get(&record.id).unwrap().unwrap();
        assert_eq!(loaded.author, None);
        assert_eq!(loaded.likes, 0);
    }

    #[test]
    fn test_insert_many() {
        let store = BlogStore::in_memory().unwrap();
        let records = store
            .insert_many(&[valid("One", "A", 1), valid("Two", "B", 2)])
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id, records[1].id);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_get_missing() {
        let store = BlogStore::in_memory().unwrap();
        assert_eq!(store.get(&BlogId::new("missing")).unwrap(), None);
    }

    #[test]
    fn test_delete() {
        let store = BlogStore::in_memory().unwrap();
        let record = store.insert(&valid("Blog", "A", 0)).unwrap();

        store.delete(&record.id).unwrap();
        assert_eq!(store.count().unwrap(), 0);

        let again = store.delete(&record.id);
        assert!(matches!(again, Err(BlogListError::NotFound(id)) if id == record.id.as_str()));
    }

    #[test]
    fn test_update_likes() {
        let store = BlogStore::in_memory().unwrap();
        let record = store.insert(&valid("Blog", "A", 1)).unwrap();

        let updated = store.update_likes(&record.id, 42).unwrap();
        assert_eq!(updated.likes, 42);
        assert_eq!(updated.title, "Blog");

        assert!(matches!(
            store.update_likes(&BlogId::new("missing"), 1),
            Err(BlogListError::NotFound(_))
        ));
    }

    #[test]
    fn test_clear() {
        let store = BlogStore::in_memory().unwrap();
        store.insert(&valid("Blog", "A", 1)).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        store.clear().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig {
            path: temp_dir.path().join("blogs.db"),
            wal_mode: true,
        };

        {
            let store = BlogStore::new(config.clone()).unwrap();
            store.insert(&valid("Persistent", "A", 5)).unwrap();
        }

        let store = BlogStore::new(config).unwrap();
        let blogs = store.list().unwrap();
        assert_eq!(blogs.len(), 1);
        assert_eq!(blogs[0].title, "Persistent");
        assert_eq!(blogs[0].likes, 5);
    }
}
