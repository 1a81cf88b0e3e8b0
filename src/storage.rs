//! Document store backed by Sled.
//!
//! One tree per collection (`users`, `blogs`, `retreats`), each holding
//! Serde-serialized JSON documents keyed by their string id. The handle is
//! opened once at startup and cloned into the request handlers (Sled
//! internals are cheap to clone and safe to share).

use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::{Db, Tree};

use crate::models::{Blog, Retreat, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store error: {0}")]
    Sled(#[from] sled::Error),
    #[error("corrupt document: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[allow(dead_code)] // db kept for flush/close on shutdown paths
#[derive(Clone)]
pub struct Store {
    db: Db,
    users: Tree,
    blogs: Tree,
    retreats: Tree,
}

impl Store {
    /// Open or create the Sled database at the given path and the three
    /// collection trees. Called once at startup; failure here is fatal
    /// since no reads or writes can proceed without the store.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let users = db.open_tree("users")?;
        let blogs = db.open_tree("blogs")?;
        let retreats = db.open_tree("retreats")?;
        Ok(Self {
            db,
            users,
            blogs,
            retreats,
        })
    }

    fn put<T: Serialize>(tree: &Tree, id: &str, doc: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(doc)?;
        tree.insert(id.as_bytes(), bytes)?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(tree: &Tree, id: &str) -> Result<Option<T>, StoreError> {
        match tree.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn scan<T: DeserializeOwned>(tree: &Tree) -> Result<Vec<T>, StoreError> {
        let mut docs = Vec::new();
        for item in tree.iter() {
            let (_, bytes) = item?;
            docs.push(serde_json::from_slice(&bytes)?);
        }
        Ok(docs)
    }

    /// Returns whether a document with that id existed.
    fn remove(tree: &Tree, id: &str) -> Result<bool, StoreError> {
        Ok(tree.remove(id.as_bytes())?.is_some())
    }

    // --- users ---

    /// True if any user already holds this email. The collection is small
    /// (newsletter subscribers), so a scan stands in for a unique index.
    pub fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        for item in self.users.iter() {
            let (_, bytes) = item?;
            let user: User = serde_json::from_slice(&bytes)?;
            if user.email == email {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn put_user(&self, user: &User) -> Result<(), StoreError> {
        Self::put(&self.users, &user.id, user)
    }

    pub fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        Self::get(&self.users, id)
    }

    /// All users, newest first.
    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = Self::scan(&self.users)?;
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(users)
    }

    pub fn delete_user(&self, id: &str) -> Result<bool, StoreError> {
        Self::remove(&self.users, id)
    }

    // --- blogs ---

    pub fn put_blog(&self, blog: &Blog) -> Result<(), StoreError> {
        Self::put(&self.blogs, &blog.id, blog)
    }

    pub fn get_blog(&self, id: &str) -> Result<Option<Blog>, StoreError> {
        Self::get(&self.blogs, id)
    }

    /// Blogs newest first; `published_only` keeps just the published ones.
    pub fn list_blogs(&self, published_only: bool) -> Result<Vec<Blog>, StoreError> {
        let mut blogs: Vec<Blog> = Self::scan(&self.blogs)?;
        if published_only {
            blogs.retain(|b| b.is_published);
        }
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(blogs)
    }

    pub fn delete_blog(&self, id: &str) -> Result<bool, StoreError> {
        Self::remove(&self.blogs, id)
    }

    // --- retreats ---

    pub fn put_retreat(&self, retreat: &Retreat) -> Result<(), StoreError> {
        Self::put(&self.retreats, &retreat.id, retreat)
    }

    pub fn get_retreat(&self, id: &str) -> Result<Option<Retreat>, StoreError> {
        Self::get(&self.retreats, id)
    }

    /// Retreats newest first; `active_only` keeps just the active ones.
    pub fn list_retreats(&self, active_only: bool) -> Result<Vec<Retreat>, StoreError> {
        let mut retreats: Vec<Retreat> = Self::scan(&self.retreats)?;
        if active_only {
            retreats.retain(|r| r.is_active);
        }
        retreats.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(retreats)
    }

    pub fn delete_retreat(&self, id: &str) -> Result<bool, StoreError> {
        Self::remove(&self.retreats, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlogInput, NewUser, RetreatInput};
    use chrono::Utc;

    fn open_temp_store() -> (Store, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = Store::open(dir.path().to_str().unwrap()).expect("open store");
        (store, dir)
    }

    fn sample_retreat(store: &Store, label: &str, active: bool) -> Retreat {
        let retreat = RetreatInput {
            label: Some(label.to_string()),
            title: Some("Weekend immersion".to_string()),
            price: Some(250.0),
            description: Some("Three days of stillness".to_string()),
            is_active: Some(active),
            ..Default::default()
        }
        .into_retreat(Utc::now());
        store.put_retreat(&retreat).expect("put retreat");
        retreat
    }

    #[test]
    fn round_trips_a_blog_document() {
        let (store, _dir) = open_temp_store();
        let blog = BlogInput {
            title: Some("On breath".to_string()),
            subtitle: Some("Coming home".to_string()),
            description: Some("Notes on breathing".to_string()),
            ..Default::default()
        }
        .into_blog(Utc::now())
        .expect("build blog");
        store.put_blog(&blog).expect("put blog");

        let loaded = store.get_blog(&blog.id).expect("get").expect("found");
        assert_eq!(loaded.title, "On breath");
        assert!(!loaded.is_published);

        assert!(store.get_blog("missing-id").expect("get").is_none());
    }

    #[test]
    fn lists_sort_newest_first_and_honor_filters() {
        let (store, _dir) = open_temp_store();
        let older = sample_retreat(&store, "older", true);
        let inactive = sample_retreat(&store, "inactive", false);
        let newer = sample_retreat(&store, "newer", true);

        let all = store.list_retreats(false).expect("list all");
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[2].id, older.id);

        let active = store.list_retreats(true).expect("list active");
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|r| r.is_active));
        assert!(!active.iter().any(|r| r.id == inactive.id));
    }

    #[test]
    fn empty_collection_lists_as_empty_vec() {
        let (store, _dir) = open_temp_store();
        assert!(store.list_blogs(false).expect("list").is_empty());
        assert!(store.list_blogs(true).expect("list").is_empty());
    }

    #[test]
    fn email_uniqueness_scan_finds_existing_subscriber() {
        let (store, _dir) = open_temp_store();
        let user = NewUser {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
        }
        .into_user(Utc::now());
        store.put_user(&user).expect("put user");

        assert!(store.email_taken("ada@example.com").expect("scan"));
        assert!(!store.email_taken("someone@else.com").expect("scan"));
    }

    #[test]
    fn delete_reports_whether_document_existed() {
        let (store, _dir) = open_temp_store();
        let retreat = sample_retreat(&store, "r", true);
        assert!(store.delete_retreat(&retreat.id).expect("delete"));
        assert!(!store.delete_retreat(&retreat.id).expect("delete again"));
        assert!(store.get_retreat(&retreat.id).expect("get").is_none());
    }
}
